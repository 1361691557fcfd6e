//! Headless transcripts of fixture scripts

use std::time::Duration;

use chatreel::playback::{record, DemoPhase, PlaybackOptions, SegmentReport, TranscriptPlan};

use crate::helpers::load_script;

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

#[test]
fn snapshot_minimal_transcript() {
    let transcript = record(
        load_script("minimal.toml"),
        PlaybackOptions::default(),
        TranscriptPlan::default(),
    );
    insta::assert_snapshot!("minimal_transcript", transcript.render_plain().trim_end());
}

#[test]
fn stop_mid_stream_shows_partial_marker_as_text() {
    // Streaming starts at 2400; "B is faster[1" takes 13 ticks of 10ms
    let plan = TranscriptPlan {
        stop_at: Some(ms(2400 + 120)),
        replay_at: None,
    };
    let transcript = record(load_script("minimal.toml"), PlaybackOptions::default(), plan);

    assert_eq!(transcript.frame.phase, DemoPhase::Streaming);
    assert_eq!(transcript.frame.streamed_text, "B is faster[1");
    assert_eq!(
        transcript.frame.segments,
        vec![SegmentReport::Text {
            text: "B is faster[1".to_string()
        }]
    );
    assert!(transcript.frame.artifact.is_none());
}

#[test]
fn reduced_motion_transcript_ends_at_streaming_start() {
    let transcript = record(
        load_script("minimal.toml"),
        PlaybackOptions { reduced_motion: true },
        TranscriptPlan::default(),
    );

    let last_two: Vec<(u64, DemoPhase)> = transcript
        .timeline
        .iter()
        .rev()
        .take(2)
        .map(|e| (e.at_ms, e.phase))
        .collect();
    assert_eq!(last_two, vec![(2400, DemoPhase::Complete), (2400, DemoPhase::Streaming)]);
    assert_eq!(transcript.frame.elapsed_ms, 2400);
    assert!(transcript.frame.artifact.is_some());
}

#[test]
fn json_frame_uses_citation_segments() {
    let transcript = record(
        load_script("sparse_citations.toml"),
        PlaybackOptions::default(),
        TranscriptPlan::default(),
    );
    let json = serde_json::to_value(&transcript).unwrap();

    assert_eq!(json["frame"]["phase"], "complete");
    assert_eq!(json["timeline"][0]["phase"], "idle");
    assert!(json.get("plain_frame").is_none());

    let segments = json["frame"]["segments"].as_array().unwrap();
    let citations: Vec<&serde_json::Value> = segments
        .iter()
        .filter(|s| s["kind"] == "citation")
        .collect();
    assert_eq!(citations.len(), 2);
    assert_eq!(citations[0]["number"], 1);
    assert!(citations[0].get("page").is_none());
    assert_eq!(citations[1]["number"], 3);
    assert_eq!(citations[1]["page"], 7);
}

#[test]
fn bundled_demo_file_matches_builtin() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("demos/rag-comparison.toml");
    let script = chatreel::DemoScript::load(&path).unwrap();
    assert_eq!(script, chatreel::DemoScript::builtin());
}
