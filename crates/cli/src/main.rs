use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

use clap::Parser;

use backdrop_core::effects::domain::effect_selection::EffectSelection;
use backdrop_core::effects::infrastructure::gpu_effect_backend::create_backend;
use backdrop_core::pipeline::effect_picker::EffectPicker;
use backdrop_core::pipeline::processor_cache::ProcessorCache;
use backdrop_core::pipeline::processor_reconciler::ProcessorReconciler;
use backdrop_core::pipeline::selection_dispatcher::SelectionDispatcher;
use backdrop_core::shared::constants::IMAGE_EXTENSIONS;
use backdrop_core::shared::settings::Settings;
use backdrop_core::track::domain::media_track::{MediaTrack, TrackSource};
use backdrop_core::track::infrastructure::local_video_track::LocalVideoTrack;
use backdrop_core::track::infrastructure::remote_video_track::RemoteVideoTrack;

/// Apply background blur or replacement to a camera track.
#[derive(Parser)]
#[command(name = "backdrop")]
struct Cli {
    /// Effects to apply in order: "none", a preset name, or an image file
    /// (comma-separated or repeated).
    #[arg(long, value_delimiter = ',')]
    select: Vec<String>,

    /// Directory preset images are loaded from.
    #[arg(long)]
    assets: Option<PathBuf>,

    /// Blur radius for the blur preset.
    #[arg(long)]
    blur_radius: Option<f32>,

    /// Skip the GPU probe (effects become unavailable).
    #[arg(long)]
    no_gpu: bool,

    /// Target a remote track, which can't carry effects.
    #[arg(long)]
    remote: bool,

    /// Settings file (defaults to the platform config directory).
    #[arg(long)]
    settings: Option<PathBuf>,

    /// List the available presets and exit.
    #[arg(long)]
    list: bool,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    if cli.select.is_empty() && !cli.list {
        return Err("nothing to apply: pass --select or --list".into());
    }
    let settings = load_settings(&cli)?;

    let cache = Arc::new(ProcessorCache::new(create_backend(
        settings.gpu_enabled && !cli.no_gpu,
    )));
    let mut picker = EffectPicker::from_settings(&settings, cache.is_supported());

    if cli.list {
        print_presets(&picker);
        return Ok(());
    }
    if !picker.options_visible() {
        println!("Background effects are not supported on this device.");
    }

    let track: Box<dyn MediaTrack> = if cli.remote {
        Box::new(RemoteVideoTrack::new("TR_remote", TrackSource::Camera))
    } else {
        Box::new(LocalVideoTrack::camera("TR_camera"))
    };
    let dispatcher = SelectionDispatcher::spawn(track, ProcessorReconciler::new(cache));

    for item in &cli.select {
        let selection = resolve_selection(item, &mut picker)?;
        if !dispatcher.select(selection) {
            return Err("selection worker stopped unexpectedly".into());
        }
        // One selection at a time so every step is reported.
        let result = dispatcher.outcomes().recv()?;
        println!("{:<28} {}", result.selection.to_string(), result.outcome);
    }

    let mut track = dispatcher
        .shutdown()
        .ok_or("selection worker panicked")?;
    let attached = track
        .processor_control()
        .and_then(|control| control.processor())
        .map(|p| p.name().to_string())
        .unwrap_or_else(|| "none".into());
    println!("Final processor on {}: {attached}", track.sid());

    Ok(())
}

fn load_settings(cli: &Cli) -> Result<Settings, Box<dyn std::error::Error>> {
    let mut settings = match &cli.settings {
        Some(path) => Settings::load_from(path)?,
        None => Settings::load(),
    };
    if let Some(dir) = &cli.assets {
        settings.asset_dir = Some(dir.clone());
    }
    if let Some(radius) = cli.blur_radius {
        if !(radius.is_finite() && radius >= 0.0) {
            return Err(format!("--blur-radius must be a non-negative number, got {radius}").into());
        }
        settings.blur_radius = radius;
    }
    log::debug!("Effective settings: {settings:?}");
    Ok(settings)
}

fn resolve_selection(
    item: &str,
    picker: &mut EffectPicker,
) -> Result<EffectSelection, Box<dyn std::error::Error>> {
    let item = item.trim();
    if ["none", "disable", "off"]
        .iter()
        .any(|word| item.eq_ignore_ascii_case(word))
    {
        return Ok(picker.disable());
    }
    match picker.select_preset(item) {
        Ok(selection) => Ok(selection),
        Err(_) if is_image(Path::new(item)) => {
            // A custom background matches no preset.
            picker.disable();
            Ok(EffectSelection::image(item))
        }
        Err(e) => Err(e.into()),
    }
}

fn print_presets(picker: &EffectPicker) {
    println!("Disable");
    for preset in picker.presets() {
        println!(
            "{:<12} {:?}  {}",
            preset.name,
            preset.kind,
            picker.thumbnail_path(preset).display()
        );
    }
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use backdrop_core::effects::domain::effect_preset::default_presets;

    fn picker() -> EffectPicker {
        EffectPicker::new(default_presets(), 10.0, Some(PathBuf::from("/assets")), true)
    }

    #[test]
    fn test_none_disables() {
        let mut picker = picker();
        picker.select_preset("Blur").unwrap();

        let selection = resolve_selection("None", &mut picker).unwrap();

        assert_eq!(selection, EffectSelection::Disabled);
        assert!(picker.is_disabled());
    }

    #[test]
    fn test_preset_name_selects_preset() {
        let selection = resolve_selection("office", &mut picker()).unwrap();
        assert_eq!(selection, EffectSelection::image("/assets/office.jpg"));
    }

    #[test]
    fn test_image_path_is_custom_background() {
        let selection = resolve_selection("/tmp/beach.PNG", &mut picker()).unwrap();
        assert_eq!(selection, EffectSelection::image("/tmp/beach.PNG"));
    }

    #[test]
    fn test_custom_background_clears_preset_highlight() {
        let mut picker = picker();
        resolve_selection("Office", &mut picker).unwrap();

        resolve_selection("/tmp/beach.png", &mut picker).unwrap();

        assert!(!picker.is_selected("Office"));
        assert!(picker.selected().is_none());
    }

    #[test]
    fn test_list_alone_parses() {
        let cli = Cli::try_parse_from(["backdrop", "--list"]).unwrap();
        assert!(cli.list);
        assert!(cli.select.is_empty());
    }

    #[test]
    fn test_select_accepts_comma_separated_values() {
        let cli = Cli::try_parse_from(["backdrop", "--select", "blur,office"]).unwrap();
        assert_eq!(cli.select, ["blur", "office"]);
    }

    #[test]
    fn test_select_is_repeatable() {
        let cli =
            Cli::try_parse_from(["backdrop", "--select", "nature", "--select", "none"]).unwrap();
        assert_eq!(cli.select, ["nature", "none"]);
    }

    #[test]
    fn test_unknown_word_is_error() {
        assert!(resolve_selection("sparkles", &mut picker()).is_err());
    }
}
