use std::sync::{Mutex, OnceLock};
use tempfile::TempDir;

const TOUCHED_VARS: [&str; 5] = [
    "VULTABLE_API_URL",
    "VULTABLE_DEFAULT_TABLE_LANGUAGE",
    "VULTABLE_UI_LANGUAGE",
    "VULTABLE_FAILURE_POLICY",
    "VULTABLE_INDICATOR__PERIOD_MS",
];

fn env_lock() -> &'static Mutex<()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(()))
}

struct EnvRestore {
    xdg_config_home: Option<std::ffi::OsString>,
    saved: Vec<(&'static str, Option<std::ffi::OsString>)>,
}

impl Drop for EnvRestore {
    fn drop(&mut self) {
        if let Some(value) = self.xdg_config_home.take() {
            std::env::set_var("XDG_CONFIG_HOME", value);
        } else {
            std::env::remove_var("XDG_CONFIG_HOME");
        }

        for (name, value) in self.saved.drain(..) {
            match value {
                Some(value) => std::env::set_var(name, value),
                None => std::env::remove_var(name),
            }
        }
    }
}

fn write_config(temp_dir: &TempDir, contents: &str) {
    let app_config_dir = temp_dir.path().join("vultable");
    std::fs::create_dir_all(&app_config_dir).expect("create config dir");
    std::fs::write(app_config_dir.join("config.toml"), contents).expect("write config");
}

/// Run `f` with a temporary XDG config home holding `config_toml` and a clean
/// `VULTABLE_*` environment.
pub fn with_config_env<T>(config_toml: &str, f: impl FnOnce() -> T) -> T {
    let _guard = env_lock().lock().unwrap_or_else(|e| e.into_inner());
    let temp_dir = TempDir::new().expect("temp dir");

    write_config(&temp_dir, config_toml);

    let restore = EnvRestore {
        xdg_config_home: std::env::var_os("XDG_CONFIG_HOME"),
        saved: TOUCHED_VARS
            .iter()
            .map(|name| (*name, std::env::var_os(name)))
            .collect(),
    };

    std::env::set_var("XDG_CONFIG_HOME", temp_dir.path());
    for name in TOUCHED_VARS {
        std::env::remove_var(name);
    }

    let result = f();
    drop(restore);
    result
}
