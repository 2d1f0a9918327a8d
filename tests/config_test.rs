use cubefall::config::{
    load_settings_from, save_settings_to, AppSettings, SimulationParams, TimestepMode,
};
use cubefall::CubefallError;
use std::fs;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

// Loading reads CUBEFALL_* variables, which are shared by every test thread.
static ENV_LOCK: Mutex<()> = Mutex::new(());

fn env_lock() -> MutexGuard<'static, ()> {
    ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn scratch_path(name: &str) -> PathBuf {
    std::env::temp_dir()
        .join(format!("cubefall-test-{}", std::process::id()))
        .join(name)
}

#[test]
fn test_default_parameters() {
    let params = SimulationParams::default();
    assert_eq!(params.boxes_number, 50);
    assert_eq!(params.box_size, 0.2);
    assert_eq!(params.container_size, 10.0);
    assert_eq!(params.gravity, 9.82);
    assert_eq!(params.throw_force, 15.0);

    let settings = AppSettings::default();
    assert_eq!(settings.timestep.mode, TimestepMode::Fixed);
    assert!(settings.viewer.vsync);
}

#[test]
fn test_missing_file_gives_defaults() {
    let _env = env_lock();
    let path = scratch_path("does-not-exist.toml");
    let settings = load_settings_from(&path).expect("missing file is not an error");
    assert_eq!(settings, AppSettings::default());
}

#[test]
fn test_partial_file_overrides_named_fields() {
    let _env = env_lock();
    let path = scratch_path("partial.toml");
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(
        &path,
        "[simulation]\nboxes_number = 200\ngravity = 3.0\n\n[timestep]\nmode = \"accumulated\"\n",
    )
    .unwrap();

    let settings = load_settings_from(&path).unwrap();
    assert_eq!(settings.simulation.boxes_number, 200);
    assert_eq!(settings.simulation.gravity, 3.0);
    assert_eq!(settings.simulation.throw_force, 15.0);
    assert_eq!(settings.simulation.box_size, 0.2);
    assert_eq!(settings.timestep.mode, TimestepMode::Accumulated);
    assert_eq!(settings.timestep.max_substeps, 5);
    assert_eq!(settings.viewer, AppSettings::default().viewer);

    fs::remove_file(&path).ok();
}

#[test]
fn test_saved_settings_load_back() {
    let _env = env_lock();
    let path = scratch_path("nested/saved.toml");
    let mut settings = AppSettings::default();
    settings.simulation.throw_force = 22.5;
    settings.simulation.boxes_number = 12;
    settings.timestep.max_substeps = 8;
    settings.viewer.vsync = false;

    save_settings_to(&settings, &path).expect("save creates parent directories");
    let loaded = load_settings_from(&path).unwrap();
    assert_eq!(loaded, settings);

    fs::remove_file(&path).ok();
}

#[test]
fn test_malformed_value_is_reported() {
    let _env = env_lock();
    let path = scratch_path("malformed.toml");
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, "[simulation]\nboxes_number = \"lots\"\n").unwrap();

    let result = load_settings_from(&path);
    assert!(matches!(result, Err(CubefallError::ConfigLoad(_))));

    fs::remove_file(&path).ok();
}

#[test]
fn test_environment_overrides_file() {
    let _env = env_lock();
    let path = scratch_path("env.toml");
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, "[simulation]\nboxes_number = 200\ngravity = 3.0\n").unwrap();

    std::env::set_var("CUBEFALL_SIMULATION__BOXES_NUMBER", "7");
    let loaded = load_settings_from(&path);
    std::env::remove_var("CUBEFALL_SIMULATION__BOXES_NUMBER");

    let settings = loaded.unwrap();
    assert_eq!(settings.simulation.boxes_number, 7);
    assert_eq!(settings.simulation.gravity, 3.0);

    fs::remove_file(&path).ok();
}
