//! Integration tests for cross-track ripple propagation.
//!
//! Drives the coordinator the way edit commands do: cut a region out of
//! the video track, then keep subtitles, overlays and music in sync.

use ripplecut_core::{TimeMs, TimeSpan};
use ripplecut_timeline::{
    AudioClip, AudioTrack, ImageOverlay, Project, RippleCoordinator, SubtitleSegment, TextOverlay,
};

fn span(start: i64, end: i64) -> TimeSpan {
    TimeSpan::new(TimeMs::new(start), TimeMs::new(end))
}

/// Cut `range` out of the primary video track and ripple every other
/// track — the sequence an interactive "delete region" command runs.
fn delete_timeline_range(project: &mut Project, range: TimeSpan) {
    let track = project.primary_track_mut().unwrap();
    track.split_at_timeline(range.start);
    track.split_at_timeline(range.end);
    let (index, _) = track.clip_at(range.start).unwrap();
    track.remove(index);
    RippleCoordinator::ripple_delete(project, range);
}

#[test]
fn delete_region_keeps_every_track_in_sync() {
    let mut project = Project::new("Sync", TimeMs::new(60_000));
    let subs = project.active_subtitle_mut().unwrap();
    subs.insert(SubtitleSegment::new(span(500, 900), "keep"));
    subs.insert(SubtitleSegment::new(span(1_100, 1_900), "gone"));
    subs.insert(SubtitleSegment::new(span(1_900, 2_100), "clipped"));
    subs.insert(SubtitleSegment::new(span(2_100, 2_900), "moved"));
    project
        .text_overlays
        .insert(TextOverlay::new(span(5_000, 6_000), "lower third"));
    project
        .image_overlays
        .insert(ImageOverlay::new(span(1_500, 4_000), "logo.png"));
    let mut bgm = AudioTrack::new("BGM");
    bgm.insert(AudioClip::new(span(0, 60_000), "theme.mp3"));
    project.bgm_tracks.push(bgm);

    delete_timeline_range(&mut project, span(1_000, 2_000));

    // Video: [0,1000) + [2000,60000) → 59s
    assert_eq!(project.output_duration(), TimeMs::new(59_000));
    assert_eq!(
        project.primary_track().unwrap().timeline_to_source(TimeMs::new(1_000)),
        Some(TimeMs::new(2_000))
    );

    // Subtitles: removed inside the cut, truncated on overlap, shifted after
    let segments = project.active_subtitle().unwrap().segments();
    let texts: Vec<&str> = segments.iter().map(|s| s.text.as_str()).collect();
    assert_eq!(texts, vec!["keep", "clipped", "moved"]);
    assert_eq!(segments[0].span, span(500, 900));
    assert_eq!(segments[1].span, span(1_000, 1_100));
    assert_eq!(segments[2].span, span(1_100, 1_900));

    // Overlays and music close the gap too
    assert_eq!(project.text_overlays.overlays()[0].span, span(4_000, 5_000));
    assert_eq!(project.image_overlays.overlays()[0].span, span(1_000, 3_000));
    assert_eq!(project.bgm_tracks[0].clips()[0].span, span(0, 59_000));
}

#[test]
fn insertion_ripple_and_inverse_restore_project() {
    let mut project = Project::new("Undo", TimeMs::new(30_000));
    let subs = project.active_subtitle_mut().unwrap();
    subs.insert(SubtitleSegment::new(span(2_000, 3_000), "a"));
    subs.insert(SubtitleSegment::new(span(8_000, 9_500), "b"));
    project
        .text_overlays
        .insert(TextOverlay::new(span(7_900, 8_600), "t"));
    let before = project.clone();

    // A 4s insertion at 5s, then its undo
    let shifted = RippleCoordinator::apply_ripple(&mut project, TimeMs::new(5_000), TimeMs::new(4_000));
    assert_eq!(shifted, 2);
    assert_eq!(
        project.active_subtitle().unwrap().segments()[1].span,
        span(12_000, 13_500)
    );

    RippleCoordinator::apply_ripple(&mut project, TimeMs::new(5_000), TimeMs::new(-4_000));
    assert_eq!(
        project.active_subtitle().unwrap().segments(),
        before.active_subtitle().unwrap().segments()
    );
    assert_eq!(
        project.text_overlays.overlays(),
        before.text_overlays.overlays()
    );
}

#[test]
fn locked_subtitle_track_survives_ripple_untouched() {
    let mut project = Project::new("Locked", TimeMs::new(30_000));
    let subs = project.active_subtitle_mut().unwrap();
    subs.insert(SubtitleSegment::new(span(10_000, 11_000), "pinned"));
    subs.locked = true;
    project
        .image_overlays
        .insert(ImageOverlay::new(span(10_000, 11_000), "a.png"));

    RippleCoordinator::apply_ripple(&mut project, TimeMs::ZERO, TimeMs::new(2_500));
    RippleCoordinator::ripple_delete(&mut project, span(0, 1_000));

    assert_eq!(
        project.active_subtitle().unwrap().segments()[0].span,
        span(10_000, 11_000)
    );
    // The unlocked overlay moved with both operations
    assert_eq!(project.image_overlays.overlays()[0].span, span(11_500, 12_500));
}
