use super::*;
use crate::clock::ManualClock;
use shared::{
    catalog,
    domain::{ActivityId, MoodId},
};
use std::sync::{Arc, Mutex};

const SECOND: Duration = Duration::from_secs(1);

#[derive(Clone, Default)]
struct RecordingVoice {
    requests: Arc<Mutex<Vec<SpeechRequest>>>,
}

impl RecordingVoice {
    fn texts(&self) -> Vec<String> {
        self.requests
            .lock()
            .expect("lock")
            .iter()
            .map(|request| request.text.clone())
            .collect()
    }

    fn count_of(&self, cue: VoiceCue) -> usize {
        let text = cue.text();
        self.texts().iter().filter(|spoken| **spoken == text).count()
    }
}

impl VoicePromptService for RecordingVoice {
    fn speak(&self, request: SpeechRequest) {
        self.requests.lock().expect("lock").push(request);
    }
}

type TestController = SessionController<ManualClock, RecordingVoice>;

fn controller() -> (TestController, ManualClock, RecordingVoice) {
    let clock = ManualClock::new();
    let voice = RecordingVoice::default();
    (
        SessionController::new(clock.clone(), voice.clone()),
        clock,
        voice,
    )
}

fn active(activity: ActivityId) -> (TestController, ManualClock, RecordingVoice) {
    let (mut controller, clock, voice) = controller();
    controller
        .select_mood(catalog::mood(MoodId::Calm))
        .expect("mood");
    controller.proceed_to_activity_choice().expect("proceed");
    controller
        .select_activity(catalog::activity(activity))
        .expect("activity");
    (controller, clock, voice)
}

#[test]
fn walks_through_phases_in_order() {
    let (mut controller, _clock, _voice) = controller();
    assert_eq!(controller.phase(), SessionPhase::CheckIn);

    controller
        .select_mood(catalog::mood(MoodId::Motivated))
        .expect("mood");
    assert_eq!(controller.phase(), SessionPhase::MoodChosen);
    assert!(controller.session().id().is_some());

    controller.proceed_to_activity_choice().expect("proceed");
    assert_eq!(controller.phase(), SessionPhase::ActivityChoice);

    controller
        .select_activity(catalog::activity(ActivityId::Run))
        .expect("activity");
    let snapshot = controller.snapshot();
    assert_eq!(snapshot.phase, SessionPhase::Active);
    assert!(snapshot.running);
    assert!(!snapshot.paused);
    assert_eq!(snapshot.elapsed_secs, 0);

    controller.finish().expect("finish");
    assert_eq!(controller.phase(), SessionPhase::Report);
}

#[test]
fn operations_outside_their_phase_are_rejected_without_side_effects() {
    let (mut controller, _clock, voice) = controller();

    let err = controller
        .select_activity(catalog::activity(ActivityId::Walk))
        .expect_err("activity before mood");
    assert_eq!(
        err,
        SessionError::InvalidPhase {
            operation: "select_activity",
            phase: SessionPhase::CheckIn,
        }
    );
    assert!(controller.proceed_to_activity_choice().is_err());
    assert!(controller.toggle_pause().is_err());
    assert!(controller.tick(controller.now()).is_err());
    assert!(controller.request_voice_prompt().is_err());
    assert!(controller.finish().is_err());

    assert_eq!(controller.session(), &Session::default());
    assert!(voice.texts().is_empty());

    controller
        .select_mood(catalog::mood(MoodId::Sad))
        .expect("mood");
    let err = controller
        .select_mood(catalog::mood(MoodId::Calm))
        .expect_err("second mood");
    assert!(matches!(err, SessionError::InvalidPhase { .. }));
    assert_eq!(controller.session().mood().map(|m| m.id), Some(MoodId::Sad));
}

#[test]
fn start_cue_is_scheduled_with_fixed_delay() {
    let (_controller, _clock, voice) = active(ActivityId::Walk);
    let requests = voice.requests.lock().expect("lock");
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests[0].text,
        VoiceCue::Start {
            activity: ActivityId::Walk
        }
        .text()
    );
    assert_eq!(requests[0].delay, START_CUE_DELAY);
    assert_eq!(requests[0].locale, "pt-BR");
}

#[test]
fn toggle_pause_twice_pauses_then_resumes() {
    let (mut controller, clock, voice) = active(ActivityId::Bike);
    clock.advance(10 * SECOND);

    assert_eq!(controller.toggle_pause(), Ok(PauseState::Paused));
    clock.advance(30 * SECOND);
    assert_eq!(controller.toggle_pause(), Ok(PauseState::Running));
    clock.advance(5 * SECOND);

    assert_eq!(controller.snapshot().elapsed_secs, 15);
    assert_eq!(voice.count_of(VoiceCue::Pause), 1);
    assert_eq!(voice.count_of(VoiceCue::Resume), 1);
}

#[test]
fn explicit_double_pause_is_rejected_and_keeps_accounting() {
    let (mut controller, clock, voice) = active(ActivityId::Walk);
    clock.advance(10 * SECOND);
    controller.pause().expect("pause");
    clock.advance(20 * SECOND);

    assert_eq!(controller.pause(), Err(SessionError::AlreadyPaused));
    assert_eq!(voice.count_of(VoiceCue::Pause), 1);

    controller.resume().expect("resume");
    assert_eq!(controller.resume(), Err(SessionError::NotPaused));
    let clock_state = controller.session().clock().expect("clock");
    assert_eq!(clock_state.accumulated_pause(), 20 * SECOND);
    assert_eq!(controller.snapshot().elapsed_secs, 10);
}

#[test]
fn elapsed_is_frozen_while_paused() {
    let (mut controller, clock, _voice) = active(ActivityId::Run);
    clock.advance(42 * SECOND);
    controller.toggle_pause().expect("pause");

    let mut reported = Vec::new();
    for _ in 0..5 {
        clock.advance(7 * SECOND);
        reported.push(controller.tick(clock.now()).expect("tick").elapsed_secs);
        reported.push(controller.snapshot().elapsed_secs);
    }
    assert!(reported.iter().all(|elapsed| *elapsed == 42));
}

#[test]
fn elapsed_is_monotonic_while_running_across_toggles() {
    let (mut controller, clock, _voice) = active(ActivityId::Run);
    let mut last = 0;
    for step in 0..40u64 {
        clock.advance(Duration::from_millis(700 + step * 13));
        if step % 9 == 0 {
            controller.toggle_pause().expect("toggle");
        }
        let elapsed = controller.tick(clock.now()).expect("tick").elapsed_secs;
        assert!(elapsed >= last, "elapsed went backwards: {elapsed} < {last}");
        last = elapsed;
    }
}

#[test]
fn redundant_ticks_fire_one_cue_per_boundary() {
    let (mut controller, clock, voice) = active(ActivityId::Walk);
    let now = clock.advance(Duration::from_secs(300));

    let first = controller.tick(now).expect("tick");
    assert_eq!(first.milestone, Some(VoiceCue::Milestone { minutes: 5 }));
    for _ in 0..5 {
        assert_eq!(controller.tick(now).expect("tick").milestone, None);
    }
    assert_eq!(voice.count_of(VoiceCue::Milestone { minutes: 5 }), 1);
    assert_eq!(controller.session().last_milestone_minutes(), 5);
}

#[test]
fn delayed_tick_skipping_boundaries_fires_only_newest() {
    let (mut controller, clock, voice) = active(ActivityId::Walk);
    let now = clock.advance(Duration::from_secs(11 * 60));

    let outcome = controller.tick(now).expect("tick");
    assert_eq!(outcome.milestone, Some(VoiceCue::Milestone { minutes: 10 }));
    assert_eq!(voice.count_of(VoiceCue::Milestone { minutes: 5 }), 0);

    let later = clock.advance(Duration::from_secs(4 * 60));
    assert_eq!(
        controller.tick(later).expect("tick").milestone,
        Some(VoiceCue::Milestone { minutes: 15 })
    );
}

#[test]
fn paused_time_does_not_count_towards_milestones() {
    let (mut controller, clock, voice) = active(ActivityId::Walk);
    clock.advance(Duration::from_secs(4 * 60));
    controller.toggle_pause().expect("pause");
    clock.advance(Duration::from_secs(10 * 60));
    controller.tick(clock.now()).expect("tick while paused");
    controller.toggle_pause().expect("resume");

    let now = clock.advance(Duration::from_secs(59));
    assert_eq!(controller.tick(now).expect("tick").milestone, None);
    let now = clock.advance(SECOND);
    assert_eq!(
        controller.tick(now).expect("tick").milestone,
        Some(VoiceCue::Milestone { minutes: 5 })
    );
    assert_eq!(voice.count_of(VoiceCue::Milestone { minutes: 5 }), 1);
}

#[test]
fn on_demand_prompt_follows_elapsed_tiers_without_touching_clock() {
    let (mut controller, clock, voice) = active(ActivityId::Run);
    clock.advance(Duration::from_secs(2 * 60));
    assert_eq!(
        controller.request_voice_prompt(),
        Ok(VoiceCue::Encouragement { minutes: 2 })
    );

    clock.advance(Duration::from_secs(8 * 60));
    assert_eq!(
        controller.request_voice_prompt(),
        Ok(VoiceCue::Encouragement { minutes: 10 })
    );

    clock.advance(Duration::from_secs(60));
    let before = controller.session().clone();
    assert_eq!(
        controller.request_voice_prompt(),
        Ok(VoiceCue::Mid { minutes: 11 })
    );
    assert_eq!(controller.session(), &before);
    assert_eq!(voice.count_of(VoiceCue::Mid { minutes: 11 }), 1);
}

#[test]
fn finish_immediately_after_start_reports_zero() {
    let (mut controller, _clock, voice) = active(ActivityId::Relax);
    let report = controller.finish().expect("finish");

    assert_eq!(report.total_elapsed_secs, 0);
    assert_eq!(report.activity, ActivityId::Relax);
    assert!(report.headline.starts_with("Autocuidado"));
    let snapshot = controller.snapshot();
    assert!(!snapshot.running);
    assert!(!snapshot.paused);
    assert_eq!(snapshot.final_elapsed_secs, Some(0));
    assert_eq!(voice.count_of(VoiceCue::Completion { minutes: 0 }), 1);
}

#[test]
fn finish_while_paused_excludes_open_pause() {
    let (mut controller, clock, _voice) = active(ActivityId::Walk);
    clock.advance(Duration::from_secs(90));
    controller.toggle_pause().expect("pause");
    clock.advance(Duration::from_secs(600));

    let report = controller.finish().expect("finish");
    assert_eq!(report.total_elapsed_secs, 90);
    assert_eq!(report.pause_count, 1);

    clock.advance(Duration::from_secs(600));
    assert_eq!(controller.snapshot().elapsed_secs, 90);
    assert!(controller.tick(clock.now()).is_err());
}

#[test]
fn reset_after_finish_matches_fresh_session() {
    let (mut controller, clock, _voice) = active(ActivityId::Bike);
    clock.advance(Duration::from_secs(400));
    controller.tick(clock.now()).expect("tick");
    controller.finish().expect("finish");

    controller.reset();
    assert_eq!(controller.session(), &Session::default());

    let (fresh, _, _) = self::controller();
    assert_eq!(controller.snapshot(), fresh.snapshot());
    assert!(controller.report().is_none());
}

#[test]
fn reset_aborts_from_any_phase() {
    let (mut controller, _clock, _voice) = active(ActivityId::Walk);
    controller.toggle_pause().expect("pause");
    controller.reset();
    assert_eq!(controller.phase(), SessionPhase::CheckIn);
    assert!(!controller.snapshot().paused);

    controller
        .select_mood(catalog::mood(MoodId::Tired))
        .expect("mood after reset");
}

#[test]
fn calm_walk_scenario_reports_five_minutes() {
    let (mut controller, clock, voice) = controller();
    controller
        .select_mood(catalog::find_mood("Tranquilo").expect("mood"))
        .expect("mood");
    controller.proceed_to_activity_choice().expect("proceed");
    controller
        .select_activity(catalog::find_activity("Caminhada").expect("activity"))
        .expect("activity");

    let mut milestones = 0;
    for _ in 0..300 {
        let now = clock.advance(SECOND);
        if controller.tick(now).expect("tick").milestone.is_some() {
            milestones += 1;
        }
    }
    assert_eq!(milestones, 1);
    assert_eq!(voice.count_of(VoiceCue::Milestone { minutes: 5 }), 1);

    let report = controller.finish().expect("finish");
    assert_eq!(report.total_elapsed_secs, 300);
    assert_eq!(report.mood_label, "Tranquilo");
    assert_eq!(report.activity_name, "Caminhada");
    assert_eq!(report.formatted_elapsed(), "05:00");
}
