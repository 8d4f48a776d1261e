mod common;

use common::{double, drain, inc, length, render, DRAIN_LIMIT};
use nebula_core::stage::map;
use nebula_core::{chain_stages, generator, stages, Chain, OptionCell, OptionError, OptionList, Pipeline, PipelineBuilder,
                  PipelineError, PipelineStatus, Stream};
use tokio_test::{assert_err, assert_ok};

#[tokio::test]
async fn builder_pipeline_goes_ready_running_drained() {
    let mut pipeline = assert_ok!(PipelineBuilder::<i64, usize>::new().module("test")
                                                                      .stage(inc())
                                                                      .stage(render())
                                                                      .stage(length())
                                                                      .build());
    assert_eq!(pipeline.status(), PipelineStatus::Ready);
    assert_eq!(pipeline.ctx().module(), "test");

    let out = pipeline.start(generator(vec![9, 99])).unwrap();
    assert_eq!(pipeline.status(), PipelineStatus::Running);
    assert_eq!(drain(out).await, vec![2, 3]);

    tokio::time::timeout(DRAIN_LIMIT, pipeline.finish()).await.unwrap().unwrap();
    assert_eq!(pipeline.status(), PipelineStatus::Drained);
    assert!(pipeline.ctx().tracker().is_empty(), "no deben quedar tareas vivas");
}

#[tokio::test]
async fn type_error_is_terminal() {
    let mut pipeline = Pipeline::<i64, i64>::new(OptionList::new());
    assert_eq!(pipeline.status(), PipelineStatus::Unbuilt);

    let err = assert_err!(pipeline.build(stages![inc(), length()]));
    assert!(matches!(err, PipelineError::AdjacentMismatch { .. }));
    assert_eq!(pipeline.status(), PipelineStatus::TypeError);

    // Nada arranca ni se reconstruye después de un TypeError.
    assert!(matches!(pipeline.start(generator(vec![1])), Err(PipelineError::InvalidState { .. })));
    assert!(matches!(pipeline.build(stages![inc()]), Err(PipelineError::InvalidState { .. })));
}

#[tokio::test]
async fn pipeline_runs_only_once() {
    let mut pipeline = PipelineBuilder::<i64, i64>::new().stage(double()).build().unwrap();
    assert_eq!(pipeline.collect(generator(vec![1, 2])).await.unwrap(), vec![2, 4]);
    assert_eq!(pipeline.status(), PipelineStatus::Drained);

    let err = pipeline.start(generator(vec![3])).unwrap_err();
    assert_eq!(err,
               PipelineError::InvalidState { current: PipelineStatus::Drained,
                                             expected: PipelineStatus::Ready });
}

#[tokio::test]
async fn finish_before_start_is_rejected() {
    let mut pipeline = PipelineBuilder::<i64, i64>::new().stage(double()).build().unwrap();
    assert!(matches!(pipeline.finish().await, Err(PipelineError::InvalidState { .. })));
}

fn scaled_factory(options: &OptionList) -> Result<(Stream<i64>, Chain<i64, i64>), PipelineError> {
    let factor = options.int("factor")?;
    let seeds = options.list("seeds")?
                       .iter()
                       .filter_map(|s| s.parse::<i64>().ok())
                       .collect();
    let chain = chain_stages(stages![map("scale", move |x: i64| x * factor)])?;
    Ok((generator(seeds), chain))
}

fn factory_options() -> OptionList {
    OptionList::new().with(OptionCell::int("factor", "multiplier").required().default_value("3"))
                     .with(OptionCell::string("seeds", "comma separated ints").default_value("1, 2,3"))
}

#[tokio::test]
async fn factory_builds_input_and_chain_from_options() {
    let (mut pipeline, input) = assert_ok!(Pipeline::from_factory(scaled_factory, factory_options()));
    let pipeline_out = pipeline.collect(input).await.unwrap();
    assert_eq!(pipeline_out, vec![3, 6, 9]);
}

#[test]
fn factory_rejects_invalid_options_before_building() {
    let mut options = factory_options();
    options.set("factor", "three").unwrap();
    let err = assert_err!(Pipeline::from_factory(scaled_factory, options));
    assert!(matches!(err, PipelineError::Option(OptionError::InvalidInt { .. })));

    let mut options = factory_options();
    options.set("factor", "").unwrap();
    let err = assert_err!(Pipeline::from_factory(scaled_factory, options));
    assert_eq!(err.to_string(), "factor is required");
}
