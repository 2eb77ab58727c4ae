mod common;

use std::sync::Arc;

use alloy_primitives::U256;

use common::{Call, MockChain, RecordingHandler};
use dsr_tracker::{models::token::one_unit, ActionDispatcher, DsrTracker, SavingsAction};

fn dispatcher(chain: &Arc<MockChain>, handler: &Arc<RecordingHandler>) -> ActionDispatcher {
    ActionDispatcher::new(chain.clone(), chain.clone(), handler.clone())
}

#[tokio::test]
async fn join_deposits_exactly_one_unit() {
    let chain = Arc::new(MockChain::new(0.0, 50.0, 7.0, 0.01));
    let handler = Arc::new(RecordingHandler::default());

    let outcome = dispatcher(&chain, &handler)
        .dispatch(SavingsAction::JoinSavings)
        .await
        .unwrap();

    assert_eq!(outcome.action, SavingsAction::JoinSavings);
    assert_eq!(chain.calls(), vec![Call::Join(one_unit())]);
    assert_eq!(one_unit(), U256::from(10u64).pow(U256::from(18u64)));
}

#[tokio::test]
async fn each_action_reaches_its_collaborator() {
    let chain = Arc::new(MockChain::default());
    let handler = Arc::new(RecordingHandler::default());
    let dispatcher = dispatcher(&chain, &handler);

    for action in SavingsAction::ALL {
        dispatcher.dispatch(action).await.unwrap();
    }

    assert_eq!(
        chain.calls(),
        vec![
            Call::Approve,
            Call::Join(one_unit()),
            Call::Exit(one_unit()),
            Call::ExitAll,
        ]
    );
}

#[tokio::test]
async fn dispatch_leaves_display_state_alone() {
    let chain = Arc::new(MockChain::new(1.0, 10.0, 5.0, 0.01));
    let handler = Arc::new(RecordingHandler::default());
    let tracker = DsrTracker::new(chain.clone(), handler.clone());
    tracker.start().await;
    let before = tracker.state().await;
    let queries = chain.balance_queries();

    dispatcher(&chain, &handler)
        .dispatch(SavingsAction::ExitAllSavings)
        .await
        .unwrap();

    assert_eq!(tracker.state().await, before);
    assert_eq!(chain.balance_queries(), queries);
}

#[tokio::test]
async fn failures_are_returned_and_reported() {
    let chain = Arc::new(MockChain::default());
    chain.fail_actions(true);
    let handler = Arc::new(RecordingHandler::default());
    let dispatcher = dispatcher(&chain, &handler);

    let err = dispatcher.dispatch(SavingsAction::ExitSavings).await.unwrap_err();
    assert!(format!("{:#}", err).contains("transaction rejected"));

    dispatcher.spawn(SavingsAction::ApproveStable).await.unwrap();

    let errors = handler.errors();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("Approve Dai failed"));
    assert!(errors[0].contains("transaction rejected"));
    assert!(handler.outcomes().is_empty());
}

#[tokio::test]
async fn spawned_actions_are_independent() {
    let chain = Arc::new(MockChain::default());
    let handler = Arc::new(RecordingHandler::default());
    let dispatcher = dispatcher(&chain, &handler);

    let tasks: Vec<_> = (0..3).map(|_| dispatcher.spawn(SavingsAction::JoinSavings)).collect();
    for task in tasks {
        task.await.unwrap();
    }

    assert_eq!(chain.calls(), vec![Call::Join(one_unit()); 3]);
    assert_eq!(handler.outcomes().len(), 3);
    assert!(handler.errors().is_empty());
}
