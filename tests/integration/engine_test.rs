//! Whole-run properties of the playback engine

use std::time::Duration;

use chatreel::playback::{DemoPhase, PlaybackEngine, PlaybackOptions};
use chatreel::script::ResponsePiece;
use chatreel::DemoScript;

use crate::helpers::load_script;

const TICK: Duration = Duration::from_millis(5);

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn started(script: DemoScript, reduced_motion: bool) -> PlaybackEngine {
    let mut engine = PlaybackEngine::new(script, PlaybackOptions { reduced_motion });
    engine.start();
    engine
}

/// Step the clock in small ticks up to `until`, calling `check` after each.
fn sample_until(engine: &mut PlaybackEngine, until: Duration, mut check: impl FnMut(&PlaybackEngine)) {
    let mut now = engine.now();
    while now < until {
        now = (now + TICK).min(until);
        engine.advance_to(now);
        check(engine);
    }
}

/// Total run length plus a margin.
fn end_of_run(engine: &PlaybackEngine) -> Duration {
    engine.now() + engine.timeline().total() + ms(100)
}

fn citation_numbers(engine: &PlaybackEngine) -> Vec<u32> {
    engine
        .view()
        .response
        .iter()
        .filter_map(|piece| match piece {
            ResponsePiece::Citation { citation, .. } => Some(citation.number),
            ResponsePiece::Text(_) => None,
        })
        .collect()
}

fn literal_text(engine: &PlaybackEngine) -> String {
    engine
        .view()
        .response
        .iter()
        .filter_map(|piece| match piece {
            ResponsePiece::Text(text) => Some(*text),
            ResponsePiece::Citation { .. } => None,
        })
        .collect()
}

// ============================================================================
// Phase monotonicity
// ============================================================================

#[test]
fn phases_advance_in_order_without_skips() {
    let mut engine = started(DemoScript::builtin(), false);
    let mut seen = vec![engine.phase()];
    let until = end_of_run(&engine);

    sample_until(&mut engine, until, |e| {
        let last = *seen.last().unwrap();
        assert!(e.phase() >= last, "phase went back from {} to {}", last, e.phase());
        if e.phase() != last {
            seen.push(e.phase());
        }
    });

    assert_eq!(seen, DemoPhase::ALL.to_vec());
    let logged: Vec<DemoPhase> = engine.drain_transitions().into_iter().map(|c| c.phase).collect();
    assert_eq!(logged, DemoPhase::ALL.to_vec());
}

#[test]
fn empty_step_list_still_passes_through_thinking() {
    let mut engine = started(load_script("no_steps.toml"), false);
    engine.run_to_completion();

    let changes = engine.drain_transitions();
    let phases: Vec<DemoPhase> = changes.iter().map(|c| c.phase).collect();
    assert_eq!(phases, DemoPhase::ALL.to_vec());
    // Streaming starts 500ms after thinking begins
    assert_eq!(changes[3].at - changes[2].at, ms(500));
}

// ============================================================================
// Step completion order
// ============================================================================

#[test]
fn steps_complete_in_list_order() {
    let mut engine = started(DemoScript::builtin(), false);
    let until = end_of_run(&engine);

    sample_until(&mut engine, until, |e| {
        let steps = e.view().steps;
        for i in 1..steps.len() {
            assert!(
                !steps[i].completed || steps[i - 1].completed,
                "step {} completed before step {} at {:?}",
                i,
                i - 1,
                e.now()
            );
        }
    });

    assert!(engine.view().steps.iter().all(|s| s.completed));
}

#[test]
fn steps_complete_every_400ms_after_thinking_starts() {
    let mut engine = started(DemoScript::builtin(), false);
    let completed = |e: &PlaybackEngine| e.view().steps.iter().filter(|s| s.completed).count();

    engine.advance_to(ms(1500));
    assert_eq!(engine.phase(), DemoPhase::Thinking);
    for i in 0..4u64 {
        let due = 1500 + 400 * (i + 1);
        engine.advance_to(ms(due - 1));
        assert_eq!(completed(&engine), i as usize);
        engine.advance_to(ms(due));
        assert_eq!(completed(&engine), i as usize + 1);
    }
}

// ============================================================================
// Character reveal monotonicity
// ============================================================================

#[test]
fn streamed_text_only_grows_and_is_a_prefix() {
    let script = DemoScript::builtin();
    let full = script.response.clone();
    let mut engine = started(script, false);
    let mut last_len = 0;
    let until = end_of_run(&engine);

    sample_until(&mut engine, until, |e| {
        let shown = e.view().streamed_text;
        assert!(full.starts_with(shown));
        assert!(shown.len() >= last_len);
        last_len = shown.len();
    });

    assert_eq!(last_len, full.len());
}

#[test]
fn multibyte_text_is_revealed_whole_characters_at_a_time() {
    let (_dir, path) = crate::helpers::temp_script(
        "user_message = \"Q\"\nresponse = \"Größe: 42 – ok ✓\"\n",
    );
    let script = DemoScript::load(&path).unwrap();
    let full = script.response.clone();
    let mut engine = started(script, false);
    let until = end_of_run(&engine);

    // Slicing at a non-boundary would panic inside the engine
    sample_until(&mut engine, until, |e| {
        assert!(full.starts_with(e.view().streamed_text));
    });
    assert_eq!(engine.view().streamed_text, full);
}

// ============================================================================
// Citation substitution
// ============================================================================

#[test]
fn only_markers_with_records_become_citations() {
    let mut engine = started(load_script("sparse_citations.toml"), false);
    engine.run_to_completion();

    assert_eq!(citation_numbers(&engine), vec![1, 3]);
    let text = literal_text(&engine);
    assert!(text.contains("[2]"));
    assert!(!text.contains("[1]"));
    assert!(!text.contains("[3]"));
}

#[test]
fn partial_markers_are_never_citations() {
    let mut engine = started(load_script("sparse_citations.toml"), false);
    let until = end_of_run(&engine);

    sample_until(&mut engine, until, |e| {
        let shown = e.view().streamed_text;
        let complete_markers = ["[1]", "[3]"].iter().filter(|m| shown.contains(*m)).count();
        assert_eq!(citation_numbers(e).len(), complete_markers, "at {:?}: {:?}", e.now(), shown);
    });
}

// ============================================================================
// Cancellation safety
// ============================================================================

#[test]
fn replay_mid_thinking_drops_old_step_timers() {
    let mut engine = started(DemoScript::builtin(), false);
    engine.advance_to(ms(2000));
    assert_eq!(engine.view().steps.iter().filter(|s| s.completed).count(), 1);

    engine.replay();
    assert_eq!(engine.phase(), DemoPhase::Idle);
    assert!(engine.view().steps.is_empty());

    // The old run's second step was due at 2300
    engine.advance_to(ms(2300));
    assert_eq!(engine.phase(), DemoPhase::Idle);
    assert!(engine.view().steps.is_empty());

    // New run: thinking at 3500, first step at 3900
    engine.advance_to(ms(3899));
    assert_eq!(engine.phase(), DemoPhase::Thinking);
    assert!(engine.view().steps.iter().all(|s| !s.completed));
    engine.advance_to(ms(3900));
    assert!(engine.view().steps[0].completed);
    assert!(!engine.view().steps[1].completed);
}

#[test]
fn replay_mid_streaming_restarts_from_scratch() {
    let mut engine = started(DemoScript::builtin(), false);
    engine.advance_to(ms(3700));
    assert_eq!(engine.phase(), DemoPhase::Streaming);
    assert!(!engine.view().streamed_text.is_empty());

    engine.replay();
    engine.drain_transitions();
    assert_eq!(engine.view().streamed_text, "");

    let restart = engine.now();
    let until = restart + ms(3600);
    sample_until(&mut engine, until - ms(1), |e| {
        assert_eq!(e.view().streamed_text, "", "old reveal ticks leaked at {:?}", e.now());
        assert!(e.phase() < DemoPhase::Streaming);
    });

    engine.run_to_completion();
    let changes = engine.drain_transitions();
    let offsets: Vec<u64> = changes.iter().map(|c| (c.at - restart).as_millis() as u64).collect();
    assert_eq!(offsets[..3], [500, 1500, 3600]);
    assert_eq!(engine.phase(), DemoPhase::Complete);
    assert_eq!(engine.runs(), 2);
}

#[test]
fn replay_after_completion_runs_again() {
    let mut engine = started(load_script("minimal.toml"), false);
    engine.run_to_completion();
    assert!(engine.view().artifact.is_some());

    engine.replay();
    assert!(engine.view().artifact.is_none());
    assert!(engine.view().user_message.is_none());
    engine.run_to_completion();
    assert_eq!(engine.phase(), DemoPhase::Complete);
}

#[test]
fn disposed_engine_ignores_everything() {
    let mut engine = started(DemoScript::builtin(), false);
    engine.advance_to(ms(600));
    engine.dispose();

    engine.advance_to(ms(60_000));
    assert_eq!(engine.phase(), DemoPhase::UserMessage);
    engine.replay();
    assert_eq!(engine.phase(), DemoPhase::UserMessage);
    assert_eq!(engine.next_deadline(), None);
}

// ============================================================================
// Reduced motion
// ============================================================================

#[test]
fn reduced_motion_completes_when_streaming_starts() {
    let script = DemoScript::builtin();
    let full = script.response.clone();
    let mut engine = started(script, true);

    engine.advance_to(ms(3599));
    assert_eq!(engine.phase(), DemoPhase::Thinking);

    engine.advance_to(ms(3600));
    let view = engine.view();
    assert_eq!(view.phase, DemoPhase::Complete);
    assert_eq!(view.streamed_text, full);
    assert!(view.artifact.is_some());

    let changes = engine.drain_transitions();
    let tail: Vec<(DemoPhase, Duration)> = changes.iter().rev().take(2).map(|c| (c.phase, c.at)).collect();
    assert_eq!(
        tail,
        vec![(DemoPhase::Complete, ms(3600)), (DemoPhase::Streaming, ms(3600))]
    );
}

#[test]
fn reduced_motion_toggled_before_streaming_takes_effect() {
    let mut engine = started(DemoScript::builtin(), false);
    engine.advance_to(ms(2000));
    engine.set_reduced_motion(true);

    engine.advance_to(ms(3600));
    assert_eq!(engine.phase(), DemoPhase::Complete);
    assert!(engine.view().artifact.is_some());
}

// ============================================================================
// End to end
// ============================================================================

#[test]
fn builtin_demo_end_to_end() {
    let script = DemoScript::builtin();
    let mut engine = started(script.clone(), false);
    engine.run_to_completion();
    let view = engine.view();

    assert_eq!(view.phase, DemoPhase::Complete);
    assert_eq!(view.user_message, Some("Compare Claude Sonnet 4 and GPT-4o for our RAG pipeline."));
    assert_eq!(view.steps.len(), 4);
    assert!(view.steps.iter().all(|s| s.completed));
    assert_eq!(view.streamed_text, script.response);
    assert!(view.artifact.is_some());

    let numbers = citation_numbers(&engine);
    assert!(numbers.contains(&1));
    assert!(numbers.contains(&2));
    let text = literal_text(&engine);
    assert!(text.contains("HumanEval"));
    assert!(text.contains("GPT-4o reaches 90.2%"));
    assert!(!text.contains("[1]"));
    assert!(!text.contains("[2]"));
}
