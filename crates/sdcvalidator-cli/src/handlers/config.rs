//! Configuration command handlers

use crate::cli::{ConfigAction, ConfigArgs, ConfigFormat, ConfigInitArgs, ConfigShowArgs};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::output::OutputWriter;

/// Handle the config command
pub fn handle_config(args: ConfigArgs, config: &Config, output: &mut OutputWriter) -> Result<i32> {
    match args.action {
        ConfigAction::Init(init_args) => handle_config_init(init_args, output),
        ConfigAction::Show(show_args) => handle_config_show(show_args, config, output),
    }
}

/// Handle config init subcommand
fn handle_config_init(args: ConfigInitArgs, output: &mut OutputWriter) -> Result<i32> {
    let path = if args.user {
        Config::user_config_path().ok_or_else(|| Error::config("Unable to determine user config directory"))?
    } else {
        Config::project_config_path()
    };

    if path.exists() && !args.force {
        output.warning(&format!(
            "Config already exists at {} (use --force to overwrite)",
            path.display()
        ))?;
        return Ok(0);
    }

    Config::default().save(&path)?;
    output.success(&format!("Created config at {}", path.display()))?;
    output.info("Set engine.command to the instance engine you validate with.")?;
    Ok(0)
}

/// Handle config show subcommand
fn handle_config_show(args: ConfigShowArgs, config: &Config, output: &mut OutputWriter) -> Result<i32> {
    let content = render_config(config, args.format)?;
    output.writeln(content.trim_end())?;
    Ok(0)
}

fn render_config(config: &Config, format: ConfigFormat) -> Result<String> {
    Ok(match format {
        ConfigFormat::Toml => toml::to_string_pretty(config)
            .map_err(|e| Error::config(format!("Failed to serialize as TOML: {}", e)))?,
        ConfigFormat::Json => serde_json::to_string_pretty(config)?,
        ConfigFormat::Yaml => serde_yaml::to_string(config)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_each_format() {
        let config = Config::default();

        let toml_text = render_config(&config, ConfigFormat::Toml).unwrap();
        assert!(toml_text.contains("[compliance]"));
        assert!(toml_text.contains("scope = \"sdc4-only\""));

        let json: serde_json::Value =
            serde_json::from_str(&render_config(&config, ConfigFormat::Json).unwrap()).unwrap();
        assert_eq!(json["output"]["format"], "human");

        let yaml = render_config(&config, ConfigFormat::Yaml).unwrap();
        assert!(yaml.contains("enabled: true"));
    }
}
