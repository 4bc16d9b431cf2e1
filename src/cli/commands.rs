//! CLI Command Implementations
//!
//! Implements the actual logic for each CLI command.

use std::thread;
use std::time::Duration;

use log::info;

use crate::config::StudioConfig;
use crate::effects::EffectKind;
use crate::error::Result;
use crate::state::ProjectState;
use crate::studio::Studio;

/// Print the seeded project.
pub fn print_state(config: &StudioConfig) -> Result<()> {
    let studio = Studio::new(config.clone());
    print_project(&studio.state())
}

/// List every effect kind with defaults and ranges.
pub fn list_effects() -> Result<()> {
    for kind in EffectKind::ALL {
        let defaults = kind.default_settings();
        println!(
            "{:<12} {:<15} {}",
            kind.as_str(),
            kind.display_name(),
            if defaults.enabled { "on" } else { "off" }
        );
        for spec in kind.param_specs() {
            println!(
                "    {:<10} {:>8} .. {:<8} default {:<8} {}",
                spec.name, spec.min, spec.max, spec.default, spec.unit
            );
        }
    }
    Ok(())
}

/// Upload a file name to a track and run its analysis to completion.
pub fn analyze(config: &StudioConfig, track: &str, file: &str, realtime: bool) -> Result<()> {
    let mut studio = Studio::new(config.clone());
    studio.require_track(track)?;

    studio.upload_file(track, file);
    println!("Analyzing '{}' on {}", file, track);

    let mut reported = 0;
    while studio.next_due_ms().is_some() {
        step(&mut studio, realtime);

        let state = studio.state();
        if let Some(t) = state.track(track) {
            for label in &t.analysis_results[reported.min(t.analysis_results.len())..] {
                println!("  [{:>5}ms] {}", studio.now_ms(), label);
            }
            reported = t.analysis_results.len();
        }
    }

    let state = studio.state();
    if let Some(t) = state.track(track) {
        let enabled: Vec<&str> = t.effects.enabled_kinds().iter().map(|k| k.as_str()).collect();
        println!("Enabled effects: {}", enabled.join(", "));
    }

    print_project(&studio.state())
}

/// Run a scripted session: add tracks, optionally analyze and master.
pub fn session(
    config: &StudioConfig,
    add_tracks: usize,
    select: Option<&str>,
    mastering: bool,
    analyze_all: bool,
) -> Result<()> {
    let mut studio = Studio::new(config.clone());

    for _ in 0..add_tracks {
        studio.add_track();
    }

    if analyze_all {
        let state = studio.state();
        for track in state.tracks().iter().filter(|t| !t.is_beat()) {
            let file = format!("{}.wav", track.name.to_lowercase().replace(' ', "_"));
            studio.upload_file(track.id(), &file);
        }
        let fired = studio.run_until_idle();
        info!("Session fired {} analysis steps", fired);
    }

    if mastering {
        studio.toggle_mastering();
    }

    if let Some(id) = select {
        studio.require_track(id)?;
        studio.set_active_track(id);
    }

    print_project(&studio.state())
}

/// Run the export placeholder and print its notification.
pub fn export(config: &StudioConfig, realtime: bool) -> Result<()> {
    let mut studio = Studio::new(config.clone());
    studio.export();
    println!("Exporting mix...");

    while studio.next_due_ms().is_some() {
        step(&mut studio, realtime);
    }

    for note in studio.take_notifications() {
        println!("[{}ms] {}", note.at_ms, note.message);
    }
    Ok(())
}

/// Advance to the next due event, sleeping in ticks when `realtime` is set.
fn step(studio: &mut Studio, realtime: bool) {
    let Some(due) = studio.next_due_ms() else {
        return;
    };
    if !realtime {
        studio.advance(due.saturating_sub(studio.now_ms()));
        return;
    }

    let tick = studio.config().realtime_tick_ms.max(1);
    while studio.now_ms() < due {
        let elapsed = tick.min(due - studio.now_ms());
        thread::sleep(Duration::from_millis(elapsed));
        studio.advance(elapsed);
    }
}

fn print_project(state: &ProjectState) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(state)?);
    Ok(())
}
