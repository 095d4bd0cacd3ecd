// Fixed engine configuration applied at initialization

/// Value of a single engine option
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    Flag(bool),
    Text(String),
}

/// Engine options. Not user-configurable through the bridge apart from the
/// configuration directory; `Default` carries the values the player ships with.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineOptions {
    /// `LC_NUMERIC` locale pinned before the engine is created
    pub numeric_locale: String,
    pub terminal: bool,
    pub msg_level: String,
    /// On-screen controller
    pub osc: bool,
    pub osc_scale: f32,
    pub load_config: bool,
    pub config_dir: String,
    pub video_output: String,
    pub audio_output: String,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            numeric_locale: "C".to_string(),
            terminal: true,
            msg_level: "all=v".to_string(),
            osc: true,
            osc_scale: 1.5,
            load_config: true,
            config_dir: String::new(),
            video_output: "libmpv".to_string(),
            audio_output: "openal".to_string(),
        }
    }
}

impl EngineOptions {
    pub fn with_config_dir(config_dir: impl Into<String>) -> Self {
        Self {
            config_dir: config_dir.into(),
            ..Self::default()
        }
    }

    /// Options set between engine creation and initialization, in order
    pub fn pre_init(&self) -> Vec<(&'static str, OptionValue)> {
        vec![
            ("terminal", OptionValue::Flag(self.terminal)),
            ("msg-level", OptionValue::Text(self.msg_level.clone())),
            ("osc", OptionValue::Flag(self.osc)),
            (
                "script-opts",
                OptionValue::Text(format!("osc-scalewindowed={}", self.osc_scale)),
            ),
            ("config", OptionValue::Text(yes_no(self.load_config).to_string())),
            ("config-dir", OptionValue::Text(self.config_dir.clone())),
        ]
    }

    /// Output backends, selected once the render context exists.
    /// Failure to set either is fatal.
    pub fn post_init(&self) -> Vec<(&'static str, OptionValue)> {
        vec![
            ("vo", OptionValue::Text(self.video_output.clone())),
            ("ao", OptionValue::Text(self.audio_output.clone())),
        ]
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_shipped_configuration() {
        let opts = EngineOptions::with_config_dir("/data/user/0/is.xyz.mpv/files");
        let pre = opts.pre_init();
        let names: Vec<_> = pre.iter().map(|(name, _)| *name).collect();
        assert_eq!(
            names,
            vec!["terminal", "msg-level", "osc", "script-opts", "config", "config-dir"]
        );
        assert_eq!(pre[1].1, OptionValue::Text("all=v".into()));
        assert_eq!(pre[3].1, OptionValue::Text("osc-scalewindowed=1.5".into()));
        assert_eq!(pre[4].1, OptionValue::Text("yes".into()));
        assert_eq!(
            pre[5].1,
            OptionValue::Text("/data/user/0/is.xyz.mpv/files".into())
        );
        assert_eq!(opts.numeric_locale, "C");
    }

    #[test]
    fn output_backends_come_after_initialize() {
        let post = EngineOptions::default().post_init();
        assert_eq!(post[0], ("vo", OptionValue::Text("libmpv".into())));
        assert_eq!(post[1], ("ao", OptionValue::Text("openal".into())));
    }
}
