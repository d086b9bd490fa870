/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::num::NonZeroUsize;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, anyhow};
use humanize_rs::ParseError;
use yaml_rust::{Yaml, yaml};

use super::OpentsdbExporterConfig;

impl OpentsdbExporterConfig {
    pub fn parse_yaml(v: &Yaml) -> anyhow::Result<Self> {
        if let Yaml::Hash(map) = v {
            let mut config = OpentsdbExporterConfig::default();
            foreach_kv(map, |k, v| config.set_by_yaml_kv(k, v))?;
            Ok(config)
        } else {
            Err(anyhow!(
                "yaml value type for 'opentsdb exporter config' should be 'map'"
            ))
        }
    }

    fn set_by_yaml_kv(&mut self, k: &str, v: &Yaml) -> anyhow::Result<()> {
        match normalize_key(k).as_str() {
            "uri" => {
                self.uri = as_string(v).context(format!("invalid string value for key {k}"))?;
            }
            "user_name" | "username" => {
                self.user_name =
                    Some(as_string(v).context(format!("invalid string value for key {k}"))?);
            }
            "password" => {
                self.password =
                    Some(as_string(v).context(format!("invalid string value for key {k}"))?);
            }
            "compressed" => {
                self.compressed =
                    as_bool(v).context(format!("invalid bool value for key {k}"))?;
            }
            "batch_size" => {
                self.batch_size = as_nonzero_usize(v)
                    .context(format!("invalid nonzero usize value for key {k}"))?;
            }
            "connect_timeout" => {
                self.connect_timeout = as_duration(v)
                    .context(format!("invalid humanize duration value for key {k}"))?;
            }
            "read_timeout" => {
                self.read_timeout = as_duration(v)
                    .context(format!("invalid humanize duration value for key {k}"))?;
            }
            "step" => {
                self.step = as_duration(v)
                    .context(format!("invalid humanize duration value for key {k}"))?;
            }
            _ => return Err(anyhow!("invalid key {k}")),
        }
        Ok(())
    }
}

fn normalize_key(raw: &str) -> String {
    raw.to_lowercase().replace('-', "_")
}

fn foreach_kv<F>(table: &yaml::Hash, mut f: F) -> anyhow::Result<()>
where
    F: FnMut(&str, &Yaml) -> anyhow::Result<()>,
{
    for (k, v) in table.iter() {
        if let Yaml::String(key) = k {
            f(key, v).context(format!("failed to parse value of key {key}"))?;
        } else {
            return Err(anyhow!("key in hash should be string"));
        }
    }
    Ok(())
}

fn as_string(v: &Yaml) -> anyhow::Result<String> {
    match v {
        Yaml::String(s) => Ok(s.to_string()),
        Yaml::Integer(i) => Ok(i.to_string()),
        Yaml::Real(s) => Ok(s.to_string()),
        _ => Err(anyhow!(
            "yaml value type for string should be 'string' / 'integer' / 'real'"
        )),
    }
}

fn as_bool(v: &Yaml) -> anyhow::Result<bool> {
    match v {
        Yaml::String(s) => match s.to_lowercase().as_str() {
            "on" | "true" | "yes" | "1" => Ok(true),
            "off" | "false" | "no" | "0" => Ok(false),
            _ => Err(anyhow!("invalid yaml string value for 'bool': {s}")),
        },
        Yaml::Boolean(value) => Ok(*value),
        Yaml::Integer(i) => Ok(*i != 0),
        _ => Err(anyhow!(
            "yaml value type for 'bool' should be 'boolean' / 'string' / 'integer'"
        )),
    }
}

fn as_nonzero_usize(v: &Yaml) -> anyhow::Result<NonZeroUsize> {
    match v {
        Yaml::String(s) => Ok(NonZeroUsize::from_str(s)?),
        Yaml::Integer(i) => {
            let u = usize::try_from(*i)?;
            Ok(NonZeroUsize::try_from(u)?)
        }
        _ => Err(anyhow!(
            "yaml value type for 'nonzero usize' should be 'string' or 'integer'"
        )),
    }
}

fn as_duration(v: &Yaml) -> anyhow::Result<Duration> {
    match v {
        Yaml::String(value) => match humanize_rs::duration::parse(value) {
            Ok(v) => Ok(v),
            Err(ParseError::MissingUnit) => {
                if let Ok(u) = u64::from_str(value) {
                    Ok(Duration::from_secs(u))
                } else {
                    Err(anyhow!("invalid duration string"))
                }
            }
            Err(e) => Err(anyhow!("invalid humanize duration string: {e}")),
        },
        Yaml::Integer(value) => {
            if let Ok(u) = u64::try_from(*value) {
                Ok(Duration::from_secs(u))
            } else {
                Err(anyhow!("unsupported duration value"))
            }
        }
        _ => Err(anyhow!(
            "yaml value type for humanize duration should be 'string' or 'integer'"
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yaml_rust::YamlLoader;

    fn yaml_doc(s: &str) -> Yaml {
        YamlLoader::load_from_str(s).unwrap().pop().unwrap()
    }

    #[test]
    fn parse_yaml_ok() {
        let yaml = yaml_doc(
            r#"
                uri: "http://tsdb.example.net:4242"
                username: "metrics"
                password: "secret"
                compressed: false
                batch_size: 300
                connect_timeout: "5s"
                read_timeout: "500ms"
                step: "1m"
            "#,
        );
        let config = OpentsdbExporterConfig::parse_yaml(&yaml).unwrap();
        assert_eq!(config.uri, "http://tsdb.example.net:4242");
        assert_eq!(config.user_name.as_deref(), Some("metrics"));
        assert_eq!(config.password.as_deref(), Some("secret"));
        assert!(!config.compressed);
        assert_eq!(config.batch_size.get(), 300);
        assert_eq!(config.connect_timeout, Duration::from_secs(5));
        assert_eq!(config.read_timeout, Duration::from_millis(500));
        assert_eq!(config.step, Duration::from_secs(60));
    }

    #[test]
    fn parse_yaml_defaults() {
        let yaml = yaml_doc("{}");
        let config = OpentsdbExporterConfig::parse_yaml(&yaml).unwrap();
        assert_eq!(config, OpentsdbExporterConfig::default());
        assert_eq!(config.uri, "http://localhost:8086");
        assert_eq!(config.user_name, None);
        assert_eq!(config.password, None);
        assert!(config.compressed);
        assert_eq!(config.batch_size.get(), 10000);
        assert_eq!(config.connect_timeout, Duration::from_secs(1));
        assert_eq!(config.read_timeout, Duration::from_secs(10));
        assert_eq!(config.step, Duration::from_secs(60));
    }

    #[test]
    fn parse_yaml_err() {
        let yaml = yaml_doc(
            r#"
                invalid_key: "value"
            "#,
        );
        assert!(OpentsdbExporterConfig::parse_yaml(&yaml).is_err());

        let yaml = yaml_doc(
            r#"
                batch_size: 0
            "#,
        );
        assert!(OpentsdbExporterConfig::parse_yaml(&yaml).is_err());

        let yaml = yaml_doc(
            r#"
                batch_size: -10
            "#,
        );
        assert!(OpentsdbExporterConfig::parse_yaml(&yaml).is_err());

        let yaml = yaml_doc(
            r#"
                compressed: "abc"
            "#,
        );
        assert!(OpentsdbExporterConfig::parse_yaml(&yaml).is_err());

        let yaml = yaml_doc(
            r#"
                step: "1xs"
            "#,
        );
        assert!(OpentsdbExporterConfig::parse_yaml(&yaml).is_err());

        let yaml = Yaml::Array(vec![]);
        assert!(OpentsdbExporterConfig::parse_yaml(&yaml).is_err());

        let yaml = Yaml::Integer(123);
        assert!(OpentsdbExporterConfig::parse_yaml(&yaml).is_err());
    }
}
