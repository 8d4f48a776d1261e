//! Módulo `echo`: devuelve los valores recibidos, uno por línea.

use nebula_core::stage::map;
use nebula_core::{chain_stages, stages, Chain, OptionList, PipelineError, Stream};
use nebula_stages::{split_delimited, Aggregate, Echo, Stringify};

use crate::modules::options as opts;
use crate::modules::{FactoryModule, Metadata, ModuleResult, OpsecLevel, Platform, ResultData};

pub static METADATA: Metadata = Metadata { id: "echo",
                                           name: "Echo",
                                           description: "Echo comma separated values back as a text result.",
                                           platform: Platform::Universal,
                                           authors: &["nebula"],
                                           references: &[],
                                           opsec_level: OpsecLevel::None };

pub fn options() -> OptionList {
    [opts::values().required()].into_iter().collect()
}

fn factory(options: &OptionList) -> Result<(Stream<String>, Chain<String, ModuleResult>), PipelineError> {
    let values = options.string(opts::VALUES)?;
    let chain = chain_stages(stages![Echo::<String>::new(),
                                     Stringify::<String>::new(),
                                     Aggregate::<String>::new(),
                                     map("report", |lines: Vec<String>| {
                                         ModuleResult::new(&METADATA, ResultData::Text(lines.join("\n")))
                                     })])?;
    Ok((split_delimited(&values), chain))
}

pub fn module() -> FactoryModule<String> {
    FactoryModule::new(&METADATA, options, factory)
}
