//! Integration tests for the timeline subsystem.
//!
//! Exercises cross-crate interactions between ripplecut-core and
//! ripplecut-timeline: multi-source mapping, envelope-preserving splits
//! driven through commands, and serialization.

use ripplecut_core::{TimeMs, TimeSpan, VolumeEnvelope, VolumePoint};
use ripplecut_timeline::{
    Clip, ClipSource, EditCommand, Project, ProjectFile, SourceFilter, SubtitleSegment,
    Transition, TransitionKind, UndoStack, VideoTrack,
};
use uuid::Uuid;

// ── Helpers ────────────────────────────────────────────────────

fn span(start: i64, end: i64) -> TimeSpan {
    TimeSpan::new(TimeMs::new(start), TimeMs::new(end))
}

fn build_project() -> Project {
    let mut project = Project::new("Integration Test Project", TimeMs::new(60_000));
    let subs = project.active_subtitle_mut().unwrap();
    subs.insert(SubtitleSegment::new(span(1_000, 3_000), "intro"));
    subs.insert(SubtitleSegment::new(span(10_000, 12_000), "body"));
    project
}

// ── Multi-source assembly & time mapping ───────────────────────

#[test]
fn multi_source_track_maps_both_directions() {
    let broll = Uuid::new_v4();
    let mut track = VideoTrack::from_full_video(TimeMs::new(10_000));
    track.insert(
        1,
        Clip::new(ClipSource::External(broll), TimeMs::new(500), TimeMs::new(2_500)),
    );

    assert!(track.has_multiple_sources());
    assert_eq!(track.output_duration(), TimeMs::new(12_000));

    // Timeline 11_000 is 500ms into the b-roll clip
    assert_eq!(track.timeline_to_source(TimeMs::new(11_000)), Some(TimeMs::new(1_500)));

    // The same source position maps back only under the right filter
    assert_eq!(
        track.source_to_timeline(TimeMs::new(1_500), SourceFilter::Source(broll)),
        Some(TimeMs::new(11_000))
    );
    assert_eq!(
        track.source_to_timeline(TimeMs::new(1_500), SourceFilter::Primary),
        Some(TimeMs::new(1_500))
    );
}

#[test]
fn retimed_clip_keeps_mapping_consistent() {
    let mut track = VideoTrack::from_full_video(TimeMs::new(8_000));
    track.split_at_timeline(TimeMs::new(4_000));
    track.clip_mut(1).unwrap().speed = 2.0; // second half plays at 2x

    // 4000..8000 of source now occupies 4000..6000 of timeline
    assert_eq!(track.output_duration(), TimeMs::new(6_000));
    assert_eq!(track.timeline_to_source(TimeMs::new(5_000)), Some(TimeMs::new(6_000)));
    assert_eq!(
        track.source_to_timeline(TimeMs::new(6_000), SourceFilter::Any),
        Some(TimeMs::new(5_000))
    );
}

#[test]
fn transitions_shorten_output_duration() {
    let mut track = VideoTrack::from_full_video(TimeMs::new(10_000));
    track.split_at_timeline(TimeMs::new(5_000));
    track.clip_mut(0).unwrap().transition_out = Some(Transition::new(
        TransitionKind::CrossDissolve,
        TimeMs::new(400),
    ));

    assert_eq!(track.output_duration(), TimeMs::new(9_600));
    assert_eq!(
        track.clip_boundaries(),
        vec![TimeMs::ZERO, TimeMs::new(4_600)]
    );
}

// ── Command-driven editing with undo ───────────────────────────

#[test]
fn split_command_round_trips_through_undo() {
    let mut project = build_project();
    let track_id = project.video_tracks[0].id;
    let mut undo = UndoStack::new(100);

    let mut cmd = EditCommand::SplitClip {
        track_id,
        at: TimeMs::new(20_000),
        record: None,
    };
    cmd.apply(&mut project);
    undo.push(cmd);
    assert_eq!(project.video_tracks[0].len(), 2);

    let mut inverse = undo.undo().unwrap();
    inverse.apply(&mut project);
    assert_eq!(project.video_tracks[0].len(), 1);
    assert!(project.video_tracks[0].is_full_source(TimeMs::new(60_000)));
}

#[test]
fn envelope_survives_clip_level_split() {
    // The rich split (envelope preserved on both halves) lives on Clip;
    // commands that want it use it directly.
    let mut clip = Clip::from_full_source(TimeMs::new(4_000));
    clip.envelope = VolumeEnvelope::from_points(vec![
        VolumePoint::new(TimeMs::ZERO, 1.0),
        VolumePoint::new(TimeMs::new(4_000), 0.0),
    ]);

    let (first, second) = clip.split_at(TimeMs::new(1_000));
    let cut_gain = clip.volume_at(TimeMs::new(1_000));
    assert_eq!(first.volume_at(first.duration()), cut_gain);
    assert_eq!(second.volume_at(TimeMs::ZERO), cut_gain);

    // Tail of the fade is preserved, re-based
    assert_eq!(second.volume_at(TimeMs::new(3_000)), 0.0);
}

// ── Serialization round trip ───────────────────────────────────

#[test]
fn edited_project_survives_roundtrip() {
    let mut project = build_project();
    let track_id = project.video_tracks[0].id;

    let mut split = EditCommand::SplitClip {
        track_id,
        at: TimeMs::new(30_000),
        record: None,
    };
    split.apply(&mut project);
    let mut fade = EditCommand::SetTransition {
        track_id,
        clip_index: 0,
        old: None,
        new: Some(Transition::new(TransitionKind::DipToBlack, TimeMs::new(500))),
    };
    fade.apply(&mut project);

    let bytes = ProjectFile::new(project).to_json().unwrap();
    let loaded = ProjectFile::from_json(&bytes).unwrap().project;

    assert_eq!(loaded.video_tracks[0].len(), 2);
    assert_eq!(loaded.output_duration(), TimeMs::new(59_500));
    assert_eq!(loaded.active_subtitle().unwrap().len(), 2);
    assert_eq!(
        loaded.video_tracks[0].clips()[0].transition_out,
        Some(Transition::new(TransitionKind::DipToBlack, TimeMs::new(500)))
    );
}

#[test]
fn sparse_project_json_loads_with_defaults() {
    let raw = serde_json::json!({
        "project": {
            "name": "Sparse",
            "primary_duration_ms": 5_000,
            "video_tracks": [
                {"name": "V1", "clips": [{"source_in_ms": 0, "source_out_ms": 5_000}]}
            ],
            "subtitle_tracks": [
                {"name": "EN", "segments": [{"start_ms": 0, "end_ms": 800, "text": "hi"}]}
            ],
        }
    });
    let loaded = ProjectFile::from_json(&serde_json::to_vec(&raw).unwrap()).unwrap();

    let project = loaded.project;
    assert!(project.primary_track().unwrap().is_full_source(TimeMs::new(5_000)));
    assert_eq!(project.active_subtitle().unwrap().segments()[0].text, "hi");
    assert!(project.image_overlays.is_empty());
    assert!(project.text_overlays.is_empty());
    assert!(project.bgm_tracks.is_empty());
}
