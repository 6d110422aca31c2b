mod common;

use std::time::Duration;

use millionaire_engine::models::{AnswerOutcome, GameOutcome, TimerEvent};
use millionaire_engine::services::timer_driver::TimerDriver;
use tokio::sync::mpsc;
use tokio::time::{timeout, Instant};

#[tokio::test]
async fn test_driver_times_out_session_on_its_own() {
    let state = common::create_test_state();
    state
        .settings
        .update(serde_json::json!({ "timerDuration": 5 }))
        .unwrap();
    state.refresh_rules().await;
    state.engine.lock().await.start_game().unwrap();

    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut driver = TimerDriver::new(Duration::from_millis(10));
    driver.start(state.engine.clone(), tx);

    let mut ticks = Vec::new();
    let expired = loop {
        let event = timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("timer stalled")
            .expect("driver hung up early");
        match event {
            TimerEvent::TimerTick(tick) => ticks.push(tick.remaining_seconds),
            TimerEvent::TimeExpired(expired) => break expired,
        }
    };

    assert_eq!(ticks, vec![4, 3, 2, 1]);
    assert_eq!(expired.summary.outcome, GameOutcome::TimedOut);

    // loop exits after expiry and drops its sender
    assert!(timeout(Duration::from_secs(1), rx.recv()).await.unwrap().is_none());
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(!driver.is_running());
    assert_eq!(state.history.history().len(), 1);
}

#[tokio::test]
async fn test_restarting_driver_keeps_single_loop() {
    let state = common::create_test_state();
    state.engine.lock().await.start_game().unwrap();

    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut driver = TimerDriver::new(Duration::from_millis(10));
    driver.start(state.engine.clone(), tx.clone());
    driver.start(state.engine.clone(), tx);
    assert!(driver.is_running());

    let mut remaining = Vec::new();
    for _ in 0..5 {
        if let Some(TimerEvent::TimerTick(tick)) = timeout(Duration::from_secs(5), rx.recv())
            .await
            .unwrap()
        {
            remaining.push(tick.remaining_seconds);
        }
    }
    // a second loop would make ticks skip values
    assert_eq!(remaining, vec![29, 28, 27, 26, 25]);

    driver.stop();
    assert!(!driver.is_running());
}

#[tokio::test]
async fn test_next_question_gets_full_first_second() {
    let state = common::create_test_state();
    state.engine.lock().await.start_game().unwrap();

    let period = Duration::from_millis(200);
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut driver = TimerDriver::new(period);
    driver.start(state.engine.clone(), tx.clone());

    let first = timeout(Duration::from_secs(5), rx.recv()).await.unwrap();
    assert!(matches!(first, Some(TimerEvent::TimerTick(_))));

    // answer late in the second, then restart as the console does
    tokio::time::sleep(Duration::from_millis(150)).await;
    {
        let mut engine = state.engine.lock().await;
        let outcome = common::answer_correctly(&mut engine);
        assert!(matches!(outcome, AnswerOutcome::Correct { .. }));
    }
    driver.start(state.engine.clone(), tx);
    let answered_at = Instant::now();

    let next = timeout(Duration::from_secs(5), rx.recv())
        .await
        .unwrap()
        .expect("driver hung up early");
    let gap = answered_at.elapsed();
    let TimerEvent::TimerTick(tick) = next else {
        panic!("expected a tick, got {:?}", next);
    };
    assert_eq!(tick.level, 2);
    assert_eq!(tick.remaining_seconds, 29);
    assert!(gap >= Duration::from_millis(190), "next tick after {:?}", gap);

    driver.stop();
}

#[tokio::test]
async fn test_driver_stops_when_game_ends() {
    let state = common::create_test_state();
    state.engine.lock().await.start_game().unwrap();

    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut driver = TimerDriver::new(Duration::from_millis(10));
    driver.start(state.engine.clone(), tx);

    state.engine.lock().await.quit_game().unwrap();
    let closed = timeout(Duration::from_secs(1), async {
        while rx.recv().await.is_some() {}
    })
    .await;
    assert!(closed.is_ok());
}
