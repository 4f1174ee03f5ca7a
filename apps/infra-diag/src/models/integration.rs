//! Integration configuration schema (the agent's `integrations.d` format).
//!
//! Every struct denies unknown fields, so a key the agent would not
//! recognize surfaces as a schema error instead of being silently ignored.
//! Free-form sections (`config`, provider bodies, `match` values) are kept
//! as raw YAML values; only their presence is part of the shape.

use crate::models::fields::{AgentDuration, StrictMap};
use serde::de::{self, Deserializer, SeqAccess, Visitor};
use serde::Deserialize;
use serde_yaml::Value as Yaml;
use std::fmt;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
/// Root of an integrations config file.
pub struct IntegrationsConfig {
    #[serde(default)]
    pub integrations: Vec<IntegrationEntry>,
    #[serde(default)]
    pub variables: Option<StrictMap<VariableEntry>>,
    #[serde(default)]
    pub discovery: Option<Discovery>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
/// One integration instance the agent should run.
pub struct IntegrationEntry {
    pub name: Option<String>,
    #[serde(default)]
    pub cli_args: Vec<String>,
    pub exec: Option<Exec>,
    pub env: Option<StrictMap<String>>,
    pub config: Option<Yaml>,
    pub config_template_path: Option<String>,
    pub labels: Option<StrictMap<String>>,
    pub interval: Option<String>,
    pub timeout: Option<AgentDuration>,
    pub heartbeat_timeout: Option<AgentDuration>,
    pub integration_user: Option<String>,
    pub working_dir: Option<String>,
    pub when: Option<EnableConditions>,
    pub inventory_source: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
/// Executable to run: a single command line or an argv list.
pub enum Exec {
    Line(String),
    Args(Vec<String>),
}

impl<'de> Deserialize<'de> for Exec {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ExecVisitor;

        impl<'de> Visitor<'de> for ExecVisitor {
            type Value = Exec;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a command line string or a list of arguments")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                Ok(Exec::Line(v.to_string()))
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
                let mut args = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(arg) = seq.next_element::<String>()? {
                    args.push(arg);
                }
                Ok(Exec::Args(args))
            }
        }

        deserializer.deserialize_any(ExecVisitor)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
/// Conditions gating whether an integration runs at all.
pub struct EnableConditions {
    pub feature: Option<String>,
    pub file_exists: Option<String>,
    pub env_exists: Option<StrictMap<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
/// A secret or variable resolved by the agent before running integrations.
pub struct VariableEntry {
    pub cache: Option<AgentDuration>,
    pub aws: Option<Yaml>,
    pub vault: Option<Yaml>,
    pub kms: Option<Yaml>,
    #[serde(rename = "cyberark-cli")]
    pub cyberark_cli: Option<Yaml>,
    #[serde(rename = "cyberark-api")]
    pub cyberark_api: Option<Yaml>,
    pub obfuscated: Option<Yaml>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
/// Service discovery source used to template integration entries.
pub struct Discovery {
    pub ttl: Option<String>,
    pub docker: Option<ContainerDiscovery>,
    pub fargate: Option<ContainerDiscovery>,
    pub command: Option<CommandDiscovery>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContainerDiscovery {
    #[serde(rename = "match")]
    pub matcher: Option<StrictMap<Yaml>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommandDiscovery {
    pub exec: Option<Exec>,
    pub env: Option<StrictMap<String>>,
    #[serde(rename = "match")]
    pub matcher: Option<StrictMap<Yaml>>,
}
