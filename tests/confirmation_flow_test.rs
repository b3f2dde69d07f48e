//! End-to-end confirmation flows through the turn dispatcher.

mod common;

use std::sync::Arc;

use common::{result_json, scripted_dispatcher, scripted_dispatcher_with};
use taskwright::adapters::classifier::ScriptedResponse;
use taskwright::domain::models::{
    ConfirmationPhase, PlannerConfig, ScheduleHint, TaskPattern, TurnRequest, UnderstandingHints,
};
use taskwright::services::result_assembler;

const APPLE: &str = "Monitor Apple's quarterly earnings";
const TESLA: &str = "Check Tesla stock price every hour and alert me if there's significant change";

fn hints(h: UnderstandingHints) -> ScriptedResponse {
    ScriptedResponse::Hints(h)
}

fn daily_at_nine() -> ScheduleHint {
    ScheduleHint {
        interval_phrase: Some("daily".to_string()),
        clock_phrase: Some("9 AM".to_string()),
        raw_text: Some("Recurring, check daily at 9 AM".to_string()),
    }
}

#[tokio::test]
async fn test_scenario_a_target_agent_pass_through() {
    let (dispatcher, _) = scripted_dispatcher(vec![hints(UnderstandingHints::plain())]);
    let request = TurnRequest::new("What was Tesla's Q3 2024 revenue?").with_target_agent("ResearchAgent");

    let outcome = dispatcher.dispatch("a", &request).await.unwrap();

    assert!(outcome.result.adequate);
    assert_eq!(outcome.result.tasks.len(), 1);
    let task = &outcome.result.tasks[0];
    assert_eq!(task.pattern, TaskPattern::Once);
    assert_eq!(task.query, "What was Tesla's Q3 2024 revenue?");
    assert_eq!(task.agent_name, "ResearchAgent");
    assert!(task.schedule_config.is_none());

    let json = result_json(&outcome.result);
    assert!(json.get("guidance_message").is_none());
    assert!(json["tasks"][0].get("schedule_config").is_none());
    assert_eq!(json["tasks"][0]["pattern"], "once");
}

#[tokio::test]
async fn test_scenarios_b_c_d_schedule_clarification_then_confirmation() {
    let (dispatcher, _) = scripted_dispatcher(vec![
        hints(UnderstandingHints::recurring(None)),
        hints(UnderstandingHints::schedule_only(daily_at_nine())),
        hints(UnderstandingHints::plain()),
    ]);

    // B: recurring intent without a schedule
    let b = dispatcher.dispatch("apple", &TurnRequest::new(APPLE)).await.unwrap();
    assert!(!b.result.adequate);
    assert!(b.result.tasks.is_empty());
    assert!(!b.result.guidance().unwrap().is_empty());
    let state = dispatcher.session_state("apple").await.unwrap();
    assert_eq!(state.phase(), ConfirmationPhase::AwaitingScheduleClarification);
    assert_eq!(state.pending_original_query.as_deref(), Some(APPLE));

    // C: the schedule arrives and is proposed back
    let c = dispatcher
        .dispatch("apple", &TurnRequest::new("Recurring, check daily at 9 AM"))
        .await
        .unwrap();
    assert!(!c.result.adequate);
    let guidance = c.result.guidance().unwrap();
    assert!(guidance.contains("daily at 09:00"), "{guidance}");
    assert!(guidance.contains(APPLE), "{guidance}");
    let state = dispatcher.session_state("apple").await.unwrap();
    assert_eq!(state.phase(), ConfirmationPhase::AwaitingFinalConfirmation);

    // D: explicit confirmation finalizes the stored query
    let d = dispatcher.dispatch("apple", &TurnRequest::new("Yes, confirmed")).await.unwrap();
    assert!(d.result.adequate);
    assert_eq!(d.result.tasks.len(), 1);
    let task = &d.result.tasks[0];
    assert_eq!(task.pattern, TaskPattern::Recurring);
    assert_eq!(task.query, APPLE);
    assert_eq!(task.agent_name, "ResearchAgent");

    let json = result_json(&d.result);
    assert_eq!(
        json["tasks"][0]["schedule_config"],
        serde_json::json!({"interval_minutes": null, "daily_time": "09:00"})
    );
    assert_eq!(
        dispatcher.session_state("apple").await.unwrap().phase(),
        ConfirmationPhase::Idle
    );
}

#[tokio::test]
async fn test_scenario_e_schedule_in_first_utterance() {
    let first = UnderstandingHints::recurring(Some(ScheduleHint::interval("every hour")))
        .with_notification_verbs(["alert me"]);
    let (dispatcher, _) = scripted_dispatcher(vec![hints(first), hints(UnderstandingHints::plain())]);

    let proposal = dispatcher.dispatch("tesla", &TurnRequest::new(TESLA)).await.unwrap();
    assert!(!proposal.result.adequate);
    assert!(proposal.result.guidance().unwrap().contains("every 60 minutes"));
    assert_eq!(proposal.phase, ConfirmationPhase::AwaitingFinalConfirmation);
    let guidance = proposal.result.guidance().unwrap();
    assert!(!guidance.contains("every hour"), "{guidance}");
    assert!(!guidance.contains("alert me"), "{guidance}");

    let confirmed = dispatcher.dispatch("tesla", &TurnRequest::new("ok")).await.unwrap();
    assert!(confirmed.result.adequate);
    let task = &confirmed.result.tasks[0];
    assert!(!task.title.contains("every hour"), "{}", task.title);
    assert!(!task.title.contains("alert me"), "{}", task.title);
    assert_eq!(task.query, "Check Tesla stock price for significant change");
    assert!(!task.query.contains("every hour"));
    assert!(!task.query.contains("alert me"));
    assert_eq!(task.agent_name, "StockAgent");

    let json = result_json(&confirmed.result);
    assert_eq!(
        json["tasks"][0]["schedule_config"],
        serde_json::json!({"interval_minutes": 60, "daily_time": null})
    );
}

#[tokio::test]
async fn test_chinese_confirmation_followed_by_text_creates_task() {
    let first = UnderstandingHints::recurring(Some(ScheduleHint::interval("每小时")));
    let (dispatcher, _) = scripted_dispatcher(vec![hints(first), hints(UnderstandingHints::plain())]);

    let proposal = dispatcher
        .dispatch("zh", &TurnRequest::new("每小时监控特斯拉股价"))
        .await
        .unwrap();
    assert_eq!(proposal.phase, ConfirmationPhase::AwaitingFinalConfirmation);
    assert!(proposal.result.guidance().unwrap().contains("每 60 分钟"));

    let confirmed = dispatcher.dispatch("zh", &TurnRequest::new("确认创建")).await.unwrap();
    assert!(confirmed.result.adequate);
    let task = &confirmed.result.tasks[0];
    assert_eq!(task.pattern, TaskPattern::Recurring);
    assert_eq!(task.query, "监控特斯拉股价");
    assert_eq!(
        result_json(&confirmed.result)["tasks"][0]["schedule_config"],
        serde_json::json!({"interval_minutes": 60, "daily_time": null})
    );
}

#[tokio::test]
async fn test_chinese_session_keeps_chinese_guidance_for_latin_reply() {
    let first = UnderstandingHints::recurring(Some(ScheduleHint::interval("每小时")));
    let (dispatcher, _) = scripted_dispatcher(vec![hints(first), hints(UnderstandingHints::plain())]);

    dispatcher
        .dispatch("zh-decline", &TurnRequest::new("每小时监控特斯拉股价"))
        .await
        .unwrap();
    let declined = dispatcher.dispatch("zh-decline", &TurnRequest::new("no")).await.unwrap();

    assert!(!declined.result.adequate);
    assert!(declined.result.guidance().unwrap().contains("不会设置"));
    assert_eq!(
        dispatcher.session_state("zh-decline").await.unwrap().phase(),
        ConfirmationPhase::Idle
    );
}

#[tokio::test]
async fn test_confirmation_token_without_pending_proposal_is_a_query() {
    let (dispatcher, _) = scripted_dispatcher(vec![hints(UnderstandingHints::plain())]);

    let outcome = dispatcher.dispatch("fresh", &TurnRequest::new("yes")).await.unwrap();

    assert!(outcome.result.adequate);
    assert_eq!(outcome.result.tasks[0].query, "yes");
    assert_eq!(outcome.result.tasks[0].pattern, TaskPattern::Once);
}

#[tokio::test]
async fn test_confirmation_never_becomes_the_task_query() {
    let (dispatcher, _) = scripted_dispatcher(vec![
        hints(UnderstandingHints::recurring(Some(ScheduleHint::interval("every 30 minutes")))),
        hints(UnderstandingHints::plain()),
    ]);

    dispatcher
        .dispatch("gold", &TurnRequest::new("Track the gold price every 30 minutes"))
        .await
        .unwrap();
    let outcome = dispatcher.dispatch("gold", &TurnRequest::new("proceed")).await.unwrap();

    let task = &outcome.result.tasks[0];
    assert_ne!(task.query, "proceed");
    assert!(!task.query.contains("every 30 minutes"));
    assert_eq!(task.schedule_config.and_then(|s| s.interval_minutes()), Some(30));
}

#[tokio::test]
async fn test_decline_clears_pending_proposal() {
    let (dispatcher, _) = scripted_dispatcher(vec![
        hints(UnderstandingHints::recurring(Some(ScheduleHint::raw("daily at 9 AM")))),
        hints(UnderstandingHints::plain()),
    ]);

    dispatcher.dispatch("s", &TurnRequest::new(APPLE)).await.unwrap();
    let outcome = dispatcher.dispatch("s", &TurnRequest::new("No thanks")).await.unwrap();

    assert!(!outcome.result.adequate);
    assert!(outcome.result.tasks.is_empty());
    assert!(outcome.result.guidance().is_some());
    let state = dispatcher.session_state("s").await.unwrap();
    assert_eq!(state.phase(), ConfirmationPhase::Idle);
    assert!(state.pending_original_query.is_none());
}

#[tokio::test]
async fn test_correction_reproposes_with_new_schedule_only() {
    let (dispatcher, _) = scripted_dispatcher(vec![
        hints(UnderstandingHints::recurring(Some(ScheduleHint::raw("daily at 9 AM")))),
        hints(UnderstandingHints::schedule_only(ScheduleHint::interval("hourly")).amending_pending()),
    ]);

    dispatcher.dispatch("s", &TurnRequest::new(APPLE)).await.unwrap();
    let outcome = dispatcher
        .dispatch("s", &TurnRequest::new("No, make it hourly"))
        .await
        .unwrap();

    assert!(!outcome.result.adequate);
    assert!(outcome.result.guidance().unwrap().contains("every 60 minutes"));
    let state = dispatcher.session_state("s").await.unwrap();
    assert_eq!(state.phase(), ConfirmationPhase::AwaitingFinalConfirmation);
    assert_eq!(state.pending_original_query.as_deref(), Some(APPLE));
    assert_eq!(state.pending_schedule.and_then(|s| s.interval_minutes()), Some(60));
}

#[tokio::test]
async fn test_new_request_discards_pending_state() {
    let (dispatcher, _) = scripted_dispatcher(vec![
        hints(UnderstandingHints::recurring(None)),
        hints(UnderstandingHints::plain().as_new_request()),
    ]);

    dispatcher.dispatch("s", &TurnRequest::new(APPLE)).await.unwrap();
    let outcome = dispatcher
        .dispatch("s", &TurnRequest::new("What's the weather in Paris?"))
        .await
        .unwrap();

    assert!(outcome.result.adequate);
    let task = &outcome.result.tasks[0];
    assert_eq!(task.query, "What's the weather in Paris?");
    assert_eq!(task.agent_name, "WeatherAgent");
    assert_eq!(
        dispatcher.session_state("s").await.unwrap().phase(),
        ConfirmationPhase::Idle
    );
}

#[tokio::test]
async fn test_unusable_request_stores_nothing() {
    let (dispatcher, _) = scripted_dispatcher(vec![hints(UnderstandingHints::unusable(
        "impossible",
        Some("I can't predict lottery numbers.".to_string()),
    ))]);

    let outcome = dispatcher
        .dispatch("s", &TurnRequest::new("Tell me next week's lottery numbers"))
        .await
        .unwrap();

    assert!(!outcome.result.adequate);
    assert_eq!(outcome.result.guidance(), Some("I can't predict lottery numbers."));
    assert_eq!(
        dispatcher.session_state("s").await.unwrap().phase(),
        ConfirmationPhase::Idle
    );
}

#[tokio::test]
async fn test_classifier_timeout_keeps_pending_state() {
    let config = PlannerConfig {
        classify_timeout_ms: 20,
        ..PlannerConfig::default()
    };
    let (dispatcher, _) = scripted_dispatcher_with(
        vec![hints(UnderstandingHints::recurring(None)), ScriptedResponse::Hang],
        &config,
    );

    dispatcher.dispatch("s", &TurnRequest::new(APPLE)).await.unwrap();
    let before = dispatcher.session_state("s").await.unwrap();

    let outcome = dispatcher.dispatch("s", &TurnRequest::new("every hour")).await.unwrap();

    assert!(!outcome.result.adequate);
    assert_eq!(outcome.result.reason, "retry_later");
    assert!(!outcome.commits());
    assert_eq!(dispatcher.session_state("s").await.unwrap(), before);
}

#[tokio::test]
async fn test_sessions_are_independent() {
    let (dispatcher, _) = scripted_dispatcher(vec![
        hints(UnderstandingHints::recurring(None)),
        hints(UnderstandingHints::plain()),
    ]);
    let dispatcher = Arc::new(dispatcher);

    dispatcher.dispatch("one", &TurnRequest::new(APPLE)).await.unwrap();
    let other = dispatcher.dispatch("two", &TurnRequest::new("ok")).await.unwrap();

    // "ok" in a session without a proposal is an ordinary query
    assert_eq!(other.result.tasks[0].query, "ok");
    assert_eq!(
        dispatcher.session_state("one").await.unwrap().phase(),
        ConfirmationPhase::AwaitingScheduleClarification
    );
}

#[tokio::test]
async fn test_concurrent_turns_on_one_session_are_serialized() {
    let (dispatcher, _) = scripted_dispatcher(vec![]);
    let dispatcher = Arc::new(dispatcher);

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let dispatcher = Arc::clone(&dispatcher);
            tokio::spawn(async move {
                dispatcher
                    .dispatch("shared", &TurnRequest::new(format!("question {i}")))
                    .await
            })
        })
        .collect();

    for handle in handles {
        let outcome = handle.await.unwrap().unwrap();
        assert!(outcome.result.adequate);
        result_assembler::check(&outcome.result).unwrap();
    }
    assert_eq!(
        dispatcher.session_state("shared").await.unwrap().phase(),
        ConfirmationPhase::Idle
    );
}
