use std::marker::PhantomData;

use super::Chain;
use crate::stage::{AnyStage, Stage};

/// Constructor tipado de cadenas: el compilador exige que la entrada de
/// cada stage coincida con la salida del anterior.
///
/// Uso:
///   let chain: Chain<i64, usize> = Pipe::new(Inc).then(Render).then(Len).build();
///
/// Produce la misma `Chain` que `chain_stages`, sin validación en
/// ejecución porque ya no puede fallar.
pub struct Pipe<In, Out> {
    stages: Vec<AnyStage>,
    _io: PhantomData<fn(In) -> Out>,
}

impl<In, Out> Pipe<In, Out>
    where In: Send + 'static,
          Out: Send + 'static
{
    pub fn new<S>(stage: S) -> Self
        where S: Stage<Input = In, Output = Out>
    {
        Self { stages: vec![AnyStage::new(stage)],
               _io: PhantomData }
    }

    /// Añade un stage cuya entrada debe ser `Out`.
    pub fn then<S>(mut self, next: S) -> Pipe<In, S::Output>
        where S: Stage<Input = Out>
    {
        self.stages.push(AnyStage::new(next));
        Pipe { stages: self.stages,
               _io: PhantomData }
    }

    pub fn build(self) -> Chain<In, Out> {
        Chain::from_checked(self.stages)
    }
}
