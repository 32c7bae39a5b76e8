use clap::Subcommand;

use expansion_core::Config;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print one value by dotted key (e.g. tracker.history_window)
    Get { key: String },
    /// Set one value by dotted key
    Set { key: String, value: String },
    /// Print the full configuration
    List,
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::List => {
            let config = Config::load()?;
            print!("{}", toml::to_string_pretty(&config)?);
        }
        ConfigAction::Get { key } => {
            let root = toml::Value::try_from(Config::load()?)?;
            match lookup(&root, &key) {
                Some(value) => println!("{value}"),
                None => return Err(format!("unknown config key '{key}'").into()),
            }
        }
        ConfigAction::Set { key, value } => {
            let mut root = toml::Value::try_from(Config::load()?)?;
            let parsed = parse_value(&value);
            set(&mut root, &key, parsed)?;

            let config: Config = root.try_into()?;
            config.save()?;
            println!("Set {key} = {value}");
        }
    }
    Ok(())
}

fn lookup<'a>(root: &'a toml::Value, key: &str) -> Option<&'a toml::Value> {
    key.split('.')
        .try_fold(root, |value, part| value.get(part))
}

fn set(
    root: &mut toml::Value,
    key: &str,
    new_value: toml::Value,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut current = root;
    let mut parts = key.split('.').peekable();

    while let Some(part) = parts.next() {
        if parts.peek().is_none() {
            let table = current
                .as_table_mut()
                .ok_or_else(|| format!("'{key}' does not address a config value"))?;
            if !table.contains_key(part) {
                return Err(format!("unknown config key '{key}'").into());
            }
            table.insert(part.to_string(), new_value);
            return Ok(());
        }
        current = current
            .get_mut(part)
            .ok_or_else(|| format!("unknown config key '{key}'"))?;
    }

    Err(format!("unknown config key '{key}'").into())
}

/// Interpret the raw string as bool or number where possible, else string.
fn parse_value(raw: &str) -> toml::Value {
    if let Ok(b) = raw.parse::<bool>() {
        return toml::Value::Boolean(b);
    }
    if let Ok(i) = raw.parse::<i64>() {
        return toml::Value::Integer(i);
    }
    if let Ok(f) = raw.parse::<f64>() {
        return toml::Value::Float(f);
    }
    toml::Value::String(raw.to_string())
}
