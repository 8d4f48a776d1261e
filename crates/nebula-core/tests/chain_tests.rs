mod common;

use common::{double, drain, inc, length, render};
use nebula_core::stage::{map, try_map};
use nebula_core::{chain_stages, generator, stages, Chain, OnError, Pipe, PipelineBuilder, PipelineError, StageCtx};
use tokio_test::{assert_err, assert_ok};

#[tokio::test]
async fn int_chain_inc_then_double_yields_four() {
    let chain = assert_ok!(chain_stages::<i64, i64>(stages![inc(), double()]));
    let ctx = StageCtx::default();
    let out = chain.execute(&ctx, generator(vec![1])).unwrap();
    assert_eq!(drain(out).await, vec![4]);
}

#[tokio::test]
async fn mixed_types_chain_runs_end_to_end() {
    // int -> string -> string -> len ; 1 -> "1" -> "1!" -> 2
    let suffix = map("exclaim", |s: String| format!("{s}!"));
    let chain = assert_ok!(chain_stages::<i64, usize>(stages![render(), suffix, length()]));
    let ctx = StageCtx::default();
    let out = chain.execute(&ctx, generator(vec![1])).unwrap();
    assert_eq!(drain(out).await, vec![2]);
}

#[tokio::test]
async fn chain_preserves_order_for_many_items() {
    let chain = chain_stages::<i64, i64>(stages![inc(), double()]).unwrap();
    let ctx = StageCtx::default();
    let out = chain.execute(&ctx, generator((0..50).collect())).unwrap();
    let expected: Vec<i64> = (0..50).map(|x| (x + 1) * 2).collect();
    assert_eq!(drain(out).await, expected);
}

#[test]
fn empty_stage_list_is_rejected() {
    let err = assert_err!(chain_stages::<i64, i64>(vec![]));
    assert_eq!(err, PipelineError::NoStages);
    assert_eq!(err.to_string(), "no stages provided");
}

#[test]
fn adjacent_mismatch_names_both_positions_and_types() {
    let err = assert_err!(chain_stages::<i64, usize>(stages![inc(), length()]));
    match &err {
        PipelineError::AdjacentMismatch { left, output, right, input } => {
            assert_eq!((*left, *right), (0, 1));
            assert_eq!(*output, "i64");
            assert!(input.contains("String"), "input era {input}");
        }
        other => panic!("error inesperado: {other:?}"),
    }
    let msg = err.to_string();
    assert!(msg.contains("stage 0") && msg.contains("stage 1"), "{msg}");
}

#[test]
fn first_input_mismatch_is_reported_before_adjacency() {
    // Ambos fallos presentes; gana el de la entrada.
    let err = assert_err!(chain_stages::<String, usize>(stages![inc(), length()]));
    assert!(matches!(err, PipelineError::InputMismatch { found: "i64", .. }), "{err:?}");
}

#[test]
fn last_output_mismatch_reports_index() {
    let err = assert_err!(chain_stages::<i64, String>(stages![inc(), double()]));
    assert!(matches!(err, PipelineError::OutputMismatch { index: 1, found: "i64", .. }), "{err:?}");
}

#[tokio::test]
async fn pipe_builder_produces_equivalent_chain() {
    let piped: Chain<i64, usize> = Pipe::new(inc()).then(render()).then(length()).build();
    let checked = chain_stages::<i64, usize>(stages![inc(), render(), length()]).unwrap();
    assert_eq!(piped.len(), checked.len());

    let ctx = StageCtx::default();
    let a = drain(piped.execute(&ctx, generator(vec![9, 99])).unwrap()).await;
    let b = drain(checked.execute(&ctx, generator(vec![9, 99])).unwrap()).await;
    assert_eq!(a, vec![2, 3]);
    assert_eq!(a, b);
}

#[tokio::test]
async fn chain_is_reusable_and_nests_as_a_stage() {
    let inner = chain_stages::<i64, i64>(stages![inc(), inc()]).unwrap();
    let outer = chain_stages::<i64, i64>(stages![inner.clone(), double()]).unwrap();
    let ctx = StageCtx::default();

    assert_eq!(drain(outer.execute(&ctx, generator(vec![1])).unwrap()).await, vec![6]);
    // La misma definición se puede volver a ejecutar.
    assert_eq!(drain(outer.execute(&ctx, generator(vec![2])).unwrap()).await, vec![8]);
    assert_eq!(drain(inner.execute(&ctx, generator(vec![0])).unwrap()).await, vec![2]);
}

#[tokio::test]
async fn generator_yields_seeds_in_order_then_closes() {
    let seeds = vec!["s1".to_string(), "s2".to_string(), "s3".to_string()];
    assert_eq!(drain(generator(seeds.clone())).await, seeds);
}

#[tokio::test]
async fn empty_generator_is_closed_immediately() {
    let mut stream = generator(Vec::<u8>::new());
    assert!(stream.is_closed());
    assert_eq!(stream.next().await, None);

    let chain = chain_stages::<i64, i64>(stages![inc()]).unwrap();
    let ctx = StageCtx::default();
    assert!(drain(chain.execute(&ctx, generator(vec![])).unwrap()).await.is_empty());
}

fn parse(policy: OnError) -> impl nebula_core::Stage<Input = String, Output = i64> {
    try_map("parse", policy, |s: String| s.parse::<i64>())
}

#[tokio::test]
async fn try_map_skip_drops_only_the_failing_item() {
    let chain = chain_stages::<String, i64>(stages![parse(OnError::Skip), double()]).unwrap();
    let ctx = StageCtx::default();
    let input = generator(["1", "2", "tres", "4"].map(String::from).to_vec());
    let out = chain.execute(&ctx, input).unwrap();
    assert_eq!(drain(out).await, vec![2, 4, 8]);
}

#[tokio::test]
async fn try_map_abort_closes_output_and_upstream_still_finishes() {
    let mut pipeline = PipelineBuilder::<String, i64>::new().stage(map("trim", |s: String| s.trim().to_string()))
                                                           .stage(parse(OnError::Abort))
                                                           .build()
                                                           .unwrap();
    let input = generator([" 1", "2 ", "x", "4", "5"].map(String::from).to_vec());
    let out = tokio::time::timeout(common::DRAIN_LIMIT, pipeline.collect(input)).await
                                                                                 .expect("collect debe terminar")
                                                                                 .unwrap();
    assert_eq!(out, vec![1, 2], "nada después del primer error");
    // `trim` ve la entrada de `parse` cerrada y termina por su cuenta.
    assert!(pipeline.ctx().tracker().is_empty());
    assert!(!pipeline.ctx().is_cancelled());
}
