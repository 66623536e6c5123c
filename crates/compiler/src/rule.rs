use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// An alert rule as submitted by the admin UI.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AlertRule {
    pub id: String,
    pub name: String,
    pub message: String,
    /// Body used by handlers that support it, email in particular.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    pub trigger: String,
    pub values: TriggerValues,
    pub every: String,
    pub query: QueryConfig,
    pub alert_nodes: AlertNodes,
    /// Bare handler names from older clients.
    pub alerts: Vec<String>,
    pub state_changes_only: bool,
}

impl AlertRule {
    pub fn details(&self) -> Option<&str> {
        self.details.as_deref().filter(|d| !d.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TriggerValues {
    pub operator: String,
    pub value: String,
    pub range_value: String,
    pub shift: String,
    pub change: String,
    pub period: String,
    /// Carried for round trips; no generated script reads it.
    pub percentile: String,
    /// Carried for round trips; no generated script reads it.
    pub relation: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerKind {
    Threshold,
    Relative,
    Deadman,
}

impl TriggerKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "threshold" => Some(Self::Threshold),
            "relative" => Some(Self::Relative),
            "deadman" => Some(Self::Deadman),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Threshold => "threshold",
            Self::Relative => "relative",
            Self::Deadman => "deadman",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Absolute,
    Percent,
}

impl ChangeKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "change" => Some(Self::Absolute),
            "% change" => Some(Self::Percent),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QueryConfig {
    pub database: String,
    pub measurement: String,
    pub retention_policy: String,
    pub fields: Vec<Field>,
    pub tags: BTreeMap<String, Vec<String>>,
    pub group_by: GroupBy,
    pub are_tags_accepted: bool,
    /// Raw InfluxQL; when set the rule runs as a batch query.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_text: Option<String>,
}

impl QueryConfig {
    pub fn raw_text(&self) -> Option<&str> {
        self.raw_text.as_deref().filter(|q| !q.trim().is_empty())
    }

    pub fn has_aggregate(&self) -> bool {
        self.fields.iter().any(Field::is_aggregate)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupBy {
    pub time: Option<String>,
    pub tags: Vec<String>,
}

impl GroupBy {
    pub fn time(&self) -> Option<&str> {
        self.time.as_deref().filter(|t| !t.is_empty())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    #[default]
    Field,
    Func,
    Number,
    Integer,
    Wildcard,
    Regex,
    #[serde(other)]
    Other,
}

/// A selected field, or a function applied to nested fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Field {
    pub value: serde_json::Value,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    pub alias: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<Field>,
}

impl Field {
    pub fn name(&self) -> Option<&str> {
        self.value.as_str()
    }

    pub fn is_aggregate(&self) -> bool {
        self.kind == FieldKind::Func && !self.args.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KapacitorNode {
    pub args: Vec<String>,
    pub properties: Vec<KapacitorProperty>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KapacitorProperty {
    pub name: String,
    pub args: Vec<String>,
}

/// Configured handler instances, one list per handler kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AlertNodes {
    pub post: Vec<KapacitorNode>,
    pub tcp: Vec<KapacitorNode>,
    pub email: Vec<KapacitorNode>,
    pub exec: Vec<KapacitorNode>,
    pub log: Vec<KapacitorNode>,
    pub victor_ops: Vec<KapacitorNode>,
    pub pager_duty: Vec<KapacitorNode>,
    pub pager_duty2: Vec<KapacitorNode>,
    pub pushover: Vec<KapacitorNode>,
    pub sensu: Vec<KapacitorNode>,
    pub slack: Vec<KapacitorNode>,
    pub telegram: Vec<KapacitorNode>,
    pub hip_chat: Vec<KapacitorNode>,
    pub alerta: Vec<KapacitorNode>,
    pub ops_genie: Vec<KapacitorNode>,
    pub ops_genie2: Vec<KapacitorNode>,
    pub talk: Vec<KapacitorNode>,
    pub kafka: Vec<KapacitorNode>,
    pub service_now: Vec<KapacitorNode>,
    pub big_panda: Vec<KapacitorNode>,
    pub teams: Vec<KapacitorNode>,
    pub zenoss: Vec<KapacitorNode>,
}

impl AlertNodes {
    pub fn nodes(&self, kind: HandlerKind) -> &[KapacitorNode] {
        match kind {
            HandlerKind::Post => &self.post,
            HandlerKind::Tcp => &self.tcp,
            HandlerKind::Email => &self.email,
            HandlerKind::Exec => &self.exec,
            HandlerKind::Log => &self.log,
            HandlerKind::VictorOps => &self.victor_ops,
            HandlerKind::PagerDuty => &self.pager_duty,
            HandlerKind::PagerDuty2 => &self.pager_duty2,
            HandlerKind::Pushover => &self.pushover,
            HandlerKind::Sensu => &self.sensu,
            HandlerKind::Slack => &self.slack,
            HandlerKind::Telegram => &self.telegram,
            HandlerKind::HipChat => &self.hip_chat,
            HandlerKind::Alerta => &self.alerta,
            HandlerKind::OpsGenie => &self.ops_genie,
            HandlerKind::OpsGenie2 => &self.ops_genie2,
            HandlerKind::Talk => &self.talk,
            HandlerKind::Kafka => &self.kafka,
            HandlerKind::ServiceNow => &self.service_now,
            HandlerKind::BigPanda => &self.big_panda,
            HandlerKind::Teams => &self.teams,
            HandlerKind::Zenoss => &self.zenoss,
        }
    }

    /// Every handler kind with its instances, in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (HandlerKind, &[KapacitorNode])> + '_ {
        HandlerKind::ALL.iter().map(move |&kind| (kind, self.nodes(kind)))
    }

    pub fn is_empty(&self) -> bool {
        self.iter().all(|(_, nodes)| nodes.is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandlerKind {
    Post,
    Tcp,
    Email,
    Exec,
    Log,
    VictorOps,
    PagerDuty,
    PagerDuty2,
    Pushover,
    Sensu,
    Slack,
    Telegram,
    HipChat,
    Alerta,
    OpsGenie,
    OpsGenie2,
    Talk,
    Kafka,
    ServiceNow,
    BigPanda,
    Teams,
    Zenoss,
}

/// API spellings that differ from the TICKscript method name.
const ALIASES: &[(&str, HandlerKind)] = &[
    ("smtp", HandlerKind::Email),
    ("http", HandlerKind::Post),
    ("hipchat", HandlerKind::HipChat),
    ("opsgenie", HandlerKind::OpsGenie),
    ("opsgenie2", HandlerKind::OpsGenie2),
    ("pagerduty", HandlerKind::PagerDuty),
    ("pagerduty2", HandlerKind::PagerDuty2),
    ("victorops", HandlerKind::VictorOps),
    ("servicenow", HandlerKind::ServiceNow),
    ("bigpanda", HandlerKind::BigPanda),
];

impl HandlerKind {
    pub const ALL: [HandlerKind; 22] = [
        Self::Post,
        Self::Tcp,
        Self::Email,
        Self::Exec,
        Self::Log,
        Self::VictorOps,
        Self::PagerDuty,
        Self::PagerDuty2,
        Self::Pushover,
        Self::Sensu,
        Self::Slack,
        Self::Telegram,
        Self::HipChat,
        Self::Alerta,
        Self::OpsGenie,
        Self::OpsGenie2,
        Self::Talk,
        Self::Kafka,
        Self::ServiceNow,
        Self::BigPanda,
        Self::Teams,
        Self::Zenoss,
    ];

    pub fn method(self) -> &'static str {
        match self {
            Self::Post => "post",
            Self::Tcp => "tcp",
            Self::Email => "email",
            Self::Exec => "exec",
            Self::Log => "log",
            Self::VictorOps => "victorOps",
            Self::PagerDuty => "pagerDuty",
            Self::PagerDuty2 => "pagerDuty2",
            Self::Pushover => "pushover",
            Self::Sensu => "sensu",
            Self::Slack => "slack",
            Self::Telegram => "telegram",
            Self::HipChat => "hipChat",
            Self::Alerta => "alerta",
            Self::OpsGenie => "opsGenie",
            Self::OpsGenie2 => "opsGenie2",
            Self::Talk => "talk",
            Self::Kafka => "kafka",
            Self::ServiceNow => "serviceNow",
            Self::BigPanda => "bigPanda",
            Self::Teams => "teams",
            Self::Zenoss => "zenoss",
        }
    }

    /// Resolves an API handler name, accepting both aliases and method names.
    pub fn from_name(name: &str) -> Option<Self> {
        ALIASES
            .iter()
            .find(|(alias, _)| *alias == name)
            .map(|(_, kind)| *kind)
            .or_else(|| Self::ALL.into_iter().find(|kind| kind.method() == name))
    }

    pub fn aliases(self) -> impl Iterator<Item = &'static str> {
        ALIASES
            .iter()
            .filter(move |(_, kind)| *kind == self)
            .map(|(alias, _)| *alias)
    }
}

/// A generated TICKscript program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TickScript(String);

impl TickScript {
    pub fn new(script: impl Into<String>) -> Self {
        Self(script.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for TickScript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TickScript {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserialize_ui_payload() {
        let rule: AlertRule = serde_json::from_value(json!({
            "id": "1",
            "name": "cpu high",
            "trigger": "threshold",
            "values": {"operator": "greater than", "value": "90", "rangeValue": ""},
            "every": "30s",
            "query": {
                "database": "telegraf",
                "measurement": "cpu",
                "retentionPolicy": "autogen",
                "fields": [{"value": "mean", "type": "func", "alias": "", "args": [{"value": "usage_user", "type": "field"}]}],
                "tags": {"host": ["a", "b"]},
                "groupBy": {"time": "10m", "tags": ["host"]},
                "areTagsAccepted": true,
                "rawText": null
            },
            "alertNodes": {"slack": [{"args": [], "properties": [{"name": "channel", "args": ["#ops"]}]}]},
            "alerts": ["smtp"],
            "stateChangesOnly": true,
            "status": "enabled"
        }))
        .unwrap();
        assert_eq!(rule.values.operator, "greater than");
        assert_eq!(rule.query.group_by.time(), Some("10m"));
        assert!(rule.query.has_aggregate());
        assert_eq!(rule.alert_nodes.slack[0].properties[0].args, vec!["#ops"]);
        assert!(rule.state_changes_only);
        assert_eq!(rule.details(), None);
    }

    #[test]
    fn null_group_by_time_and_unknown_field_kind() {
        let query: QueryConfig = serde_json::from_value(json!({
            "fields": [{"value": "x", "type": "infix"}],
            "groupBy": {"time": null, "tags": []}
        }))
        .unwrap();
        assert_eq!(query.group_by.time(), None);
        assert_eq!(query.fields[0].kind, FieldKind::Other);
    }

    #[test]
    fn handler_names_translate() {
        assert_eq!(HandlerKind::from_name("smtp"), Some(HandlerKind::Email));
        assert_eq!(HandlerKind::from_name("http"), Some(HandlerKind::Post));
        assert_eq!(HandlerKind::from_name("hipchat"), Some(HandlerKind::HipChat));
        assert_eq!(HandlerKind::from_name("slack"), Some(HandlerKind::Slack));
        assert_eq!(HandlerKind::from_name("pagerDuty2"), Some(HandlerKind::PagerDuty2));
        assert_eq!(HandlerKind::from_name("carrierPigeon"), None);
    }

    #[test]
    fn every_method_name_round_trips() {
        for kind in HandlerKind::ALL {
            assert_eq!(HandlerKind::from_name(kind.method()), Some(kind));
            for alias in kind.aliases() {
                assert_eq!(HandlerKind::from_name(alias), Some(kind));
            }
        }
    }

    #[test]
    fn alert_nodes_iterate_in_schema_order() {
        let nodes = AlertNodes {
            slack: vec![KapacitorNode::default()],
            email: vec![KapacitorNode::default()],
            ..Default::default()
        };
        let configured: Vec<_> = nodes
            .iter()
            .filter(|(_, n)| !n.is_empty())
            .map(|(k, _)| k.method())
            .collect();
        assert_eq!(configured, vec!["email", "slack"]);
        assert!(!nodes.is_empty());
        assert!(AlertNodes::default().is_empty());
    }

    #[test]
    fn alert_node_keys_match_method_names() {
        let value = serde_json::to_value(AlertNodes::default()).unwrap();
        for kind in HandlerKind::ALL {
            assert!(value.get(kind.method()).is_some(), "{}", kind.method());
        }
    }
}
