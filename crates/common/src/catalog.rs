//! Pipeline nodes, alert properties and alert handlers known to the
//! validator, with the number of arguments each one takes.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exact(usize),
    AtLeast(usize),
    Between(usize, usize),
}

impl Arity {
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Self::Exact(n) => count == n,
            Self::AtLeast(n) => count >= n,
            Self::Between(lo, hi) => (lo..=hi).contains(&count),
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(n) => write!(f, "{n}"),
            Self::AtLeast(n) => write!(f, "at least {n}"),
            Self::Between(lo, hi) => write!(f, "{lo} to {hi}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Property {
    pub name: &'static str,
    pub arity: Arity,
}

#[derive(Debug, PartialEq, Eq)]
pub struct NodeSpec {
    pub name: &'static str,
    pub args: Arity,
    pub properties: &'static [Property],
}

impl NodeSpec {
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name == name)
    }
}

const fn prop(name: &'static str, arity: Arity) -> Property {
    Property { name, arity }
}

const fn node(name: &'static str, args: Arity, properties: &'static [Property]) -> NodeSpec {
    NodeSpec {
        name,
        args,
        properties,
    }
}

use Arity::{AtLeast, Between, Exact};

const NONE: &[Property] = &[];

const FROM: &[Property] = &[
    prop("database", Exact(1)),
    prop("retentionPolicy", Exact(1)),
    prop("measurement", Exact(1)),
    prop("groupBy", AtLeast(0)),
    prop("groupByMeasurement", Exact(0)),
    prop("where", Exact(1)),
    prop("round", Exact(1)),
    prop("truncate", Exact(1)),
    prop("quiet", Exact(0)),
];

const QUERY: &[Property] = &[
    prop("period", Exact(1)),
    prop("every", Exact(1)),
    prop("align", Exact(0)),
    prop("alignGroup", Exact(0)),
    prop("offset", Exact(1)),
    prop("groupBy", AtLeast(0)),
    prop("groupByMeasurement", Exact(0)),
    prop("fill", Exact(1)),
    prop("cluster", Exact(1)),
    prop("cron", Exact(1)),
    prop("quiet", Exact(0)),
];

const WINDOW: &[Property] = &[
    prop("period", Exact(1)),
    prop("every", Exact(1)),
    prop("periodCount", Exact(1)),
    prop("everyCount", Exact(1)),
    prop("align", Exact(0)),
    prop("fillPeriod", Exact(0)),
];

const EVAL: &[Property] = &[
    prop("as", AtLeast(1)),
    prop("tags", AtLeast(1)),
    prop("keep", AtLeast(0)),
    prop("quiet", Exact(0)),
];

const JOIN: &[Property] = &[
    prop("as", AtLeast(1)),
    prop("on", AtLeast(1)),
    prop("delimiter", Exact(1)),
    prop("fill", Exact(1)),
    prop("streamName", Exact(1)),
    prop("tolerance", Exact(1)),
];

const COMBINE: &[Property] = &[
    prop("as", AtLeast(1)),
    prop("delimiter", Exact(1)),
    prop("tolerance", Exact(1)),
    prop("max", Exact(1)),
];

const INFLUXDB_OUT: &[Property] = &[
    prop("database", Exact(1)),
    prop("retentionPolicy", Exact(1)),
    prop("measurement", Exact(1)),
    prop("cluster", Exact(1)),
    prop("writeConsistencyLevel", Exact(1)),
    prop("precision", Exact(1)),
    prop("buffer", Exact(1)),
    prop("flushInterval", Exact(1)),
    prop("create", Exact(0)),
    prop("tag", Exact(2)),
    prop("quiet", Exact(0)),
];

const HTTP_POST: &[Property] = &[
    prop("endpoint", Exact(1)),
    prop("header", Exact(2)),
    prop("captureResponse", Exact(0)),
    prop("timeout", Exact(1)),
    prop("codeField", Exact(1)),
    prop("skipSSLVerification", Exact(0)),
];

const AGGREGATE: &[Property] = &[prop("as", Exact(1)), prop("usePointTimes", Exact(0))];
const AS_ONLY: &[Property] = &[prop("as", Exact(1))];
const STATE_DURATION: &[Property] = &[prop("unit", Exact(1)), prop("as", Exact(1))];
const UNION: &[Property] = &[prop("rename", Exact(1))];
const LOG_NODE: &[Property] = &[prop("level", Exact(1)), prop("prefix", Exact(1))];
const DEFAULT: &[Property] = &[prop("field", Exact(2)), prop("tag", Exact(2))];
const DELETE: &[Property] = &[prop("field", Exact(1)), prop("tag", Exact(1))];
const GROUP_BY: &[Property] = &[prop("byMeasurement", Exact(0))];
const STATS: &[Property] = &[prop("align", Exact(0))];

const FLATTEN: &[Property] = &[
    prop("on", AtLeast(1)),
    prop("delimiter", Exact(1)),
    prop("tolerance", Exact(1)),
    prop("dropOriginalFieldName", Exact(0)),
];

const BARRIER: &[Property] = &[
    prop("idle", Exact(1)),
    prop("period", Exact(1)),
    prop("delete", Exact(1)),
];

const DERIVATIVE: &[Property] = &[
    prop("unit", Exact(1)),
    prop("nonNegative", Exact(0)),
    prop("as", Exact(1)),
];

static NODES: &[NodeSpec] = &[
    node("from", Exact(0), FROM),
    node("query", Exact(1), QUERY),
    node("window", Exact(0), WINDOW),
    node("eval", AtLeast(1), EVAL),
    node("alert", Exact(0), NONE),
    node("deadman", AtLeast(2), NONE),
    node("shift", Exact(1), NONE),
    node("join", AtLeast(1), JOIN),
    node("union", AtLeast(1), UNION),
    node("combine", AtLeast(1), COMBINE),
    node("influxDBOut", Exact(0), INFLUXDB_OUT),
    node("httpOut", Exact(1), NONE),
    node("httpPost", AtLeast(0), HTTP_POST),
    node("log", Exact(0), LOG_NODE),
    node("default", Exact(0), DEFAULT),
    node("delete", Exact(0), DELETE),
    node("where", Exact(1), NONE),
    node("groupBy", AtLeast(0), GROUP_BY),
    node("flatten", Exact(0), FLATTEN),
    node("sample", Exact(1), NONE),
    node("stats", Exact(1), STATS),
    node("barrier", Exact(0), BARRIER),
    node("changeDetect", AtLeast(1), NONE),
    node("stateDuration", Exact(1), STATE_DURATION),
    node("stateCount", Exact(1), AS_ONLY),
    node("derivative", Exact(1), DERIVATIVE),
    node("difference", Exact(1), AS_ONLY),
    node("cumulativeSum", Exact(1), AS_ONLY),
    node("movingAverage", Exact(2), AS_ONLY),
    node("elapsed", Exact(2), AS_ONLY),
    node("holtWinters", Exact(3), AS_ONLY),
    node("holtWintersWithFit", Exact(3), AS_ONLY),
    node("count", Exact(1), AGGREGATE),
    node("distinct", Exact(1), AGGREGATE),
    node("first", Exact(1), AGGREGATE),
    node("last", Exact(1), AGGREGATE),
    node("max", Exact(1), AGGREGATE),
    node("mean", Exact(1), AGGREGATE),
    node("median", Exact(1), AGGREGATE),
    node("min", Exact(1), AGGREGATE),
    node("mode", Exact(1), AGGREGATE),
    node("spread", Exact(1), AGGREGATE),
    node("stddev", Exact(1), AGGREGATE),
    node("sum", Exact(1), AGGREGATE),
    node("percentile", Exact(2), AGGREGATE),
    node("top", AtLeast(2), AS_ONLY),
    node("bottom", AtLeast(2), AS_ONLY),
];

static ALERT_PROPERTIES: &[Property] = &[
    prop("id", Exact(1)),
    prop("message", Exact(1)),
    prop("details", Exact(1)),
    prop("crit", Exact(1)),
    prop("warn", Exact(1)),
    prop("info", Exact(1)),
    prop("critReset", Exact(1)),
    prop("warnReset", Exact(1)),
    prop("infoReset", Exact(1)),
    prop("idTag", Exact(1)),
    prop("idField", Exact(1)),
    prop("levelTag", Exact(1)),
    prop("levelField", Exact(1)),
    prop("messageField", Exact(1)),
    prop("durationField", Exact(1)),
    prop("stateChangesOnly", Between(0, 1)),
    prop("flapping", Exact(2)),
    prop("history", Exact(1)),
    prop("topic", Exact(1)),
    prop("noRecoveries", Exact(0)),
    prop("all", Exact(0)),
    prop("inhibit", AtLeast(1)),
    prop("quiet", Exact(0)),
];

const SINGLE: Arity = Exact(1);

const EMAIL: &[Property] = &[prop("to", AtLeast(1))];
const LOG_HANDLER: &[Property] = &[prop("mode", SINGLE)];
const VICTOROPS: &[Property] = &[prop("routingKey", SINGLE)];
const PAGERDUTY: &[Property] = &[prop("serviceKey", SINGLE)];
const PAGERDUTY2: &[Property] = &[prop("routingKey", SINGLE), prop("link", Between(1, 2))];
const HIPCHAT: &[Property] = &[prop("room", SINGLE), prop("token", SINGLE)];
const OPSGENIE: &[Property] = &[prop("teams", AtLeast(1)), prop("recipients", AtLeast(1))];
const TEAMS: &[Property] = &[prop("channelURL", SINGLE)];

const PUSHOVER: &[Property] = &[
    prop("userKey", SINGLE),
    prop("device", SINGLE),
    prop("title", SINGLE),
    prop("uRL", SINGLE),
    prop("uRLTitle", SINGLE),
    prop("sound", SINGLE),
];

const SENSU: &[Property] = &[
    prop("source", SINGLE),
    prop("handlers", AtLeast(1)),
    prop("metadata", Exact(2)),
];

const SLACK: &[Property] = &[
    prop("workspace", SINGLE),
    prop("channel", SINGLE),
    prop("username", SINGLE),
    prop("iconEmoji", SINGLE),
];

const TELEGRAM: &[Property] = &[
    prop("chatId", SINGLE),
    prop("parseMode", SINGLE),
    prop("disableWebPagePreview", Exact(0)),
    prop("disableNotification", Exact(0)),
];

const ALERTA: &[Property] = &[
    prop("token", SINGLE),
    prop("resource", SINGLE),
    prop("event", SINGLE),
    prop("environment", SINGLE),
    prop("group", SINGLE),
    prop("value", SINGLE),
    prop("origin", SINGLE),
    prop("services", AtLeast(1)),
    prop("timeout", SINGLE),
];

const KAFKA: &[Property] = &[
    prop("cluster", SINGLE),
    prop("kafkaTopic", SINGLE),
    prop("template", SINGLE),
];

const SERVICENOW: &[Property] = &[
    prop("source", SINGLE),
    prop("node", SINGLE),
    prop("type", SINGLE),
    prop("resource", SINGLE),
    prop("metricName", SINGLE),
    prop("messageKey", SINGLE),
];

const BIGPANDA: &[Property] = &[
    prop("appKey", SINGLE),
    prop("primaryProperty", SINGLE),
    prop("secondaryProperty", SINGLE),
];

const ZENOSS: &[Property] = &[
    prop("action", SINGLE),
    prop("method", SINGLE),
    prop("type", SINGLE),
    prop("tid", SINGLE),
    prop("collector", SINGLE),
];

static HANDLERS: &[NodeSpec] = &[
    node("post", AtLeast(0), HTTP_POST),
    node("tcp", Exact(1), NONE),
    node("email", AtLeast(0), EMAIL),
    node("exec", AtLeast(1), NONE),
    node("log", Exact(1), LOG_HANDLER),
    node("victorOps", Exact(0), VICTOROPS),
    node("pagerDuty", Exact(0), PAGERDUTY),
    node("pagerDuty2", Exact(0), PAGERDUTY2),
    node("pushover", Exact(0), PUSHOVER),
    node("sensu", Exact(0), SENSU),
    node("slack", Exact(0), SLACK),
    node("telegram", Exact(0), TELEGRAM),
    node("hipChat", Exact(0), HIPCHAT),
    node("alerta", Exact(0), ALERTA),
    node("opsGenie", Exact(0), OPSGENIE),
    node("opsGenie2", Exact(0), OPSGENIE),
    node("talk", Exact(0), NONE),
    node("kafka", Exact(0), KAFKA),
    node("serviceNow", Exact(0), SERVICENOW),
    node("bigPanda", Exact(0), BIGPANDA),
    node("teams", Exact(0), TEAMS),
    node("zenoss", Exact(0), ZENOSS),
];

/// Functions callable from lambda expressions.
pub const LAMBDA_FUNCTIONS: &[&str] = &[
    "abs", "bool", "ceil", "count", "day", "duration", "float", "floor", "hour", "humanBytes",
    "if", "int", "isPresent", "log", "minute", "month", "pow", "regexReplace", "sigma", "spread",
    "sqrt", "strContains", "strHasPrefix", "strHasSuffix", "strLength", "strReplace",
    "strSubstring", "strToLower", "strToUpper", "strTrim", "string", "time", "unixNano",
    "weekday", "year",
];

pub fn node_spec(name: &str) -> Option<&'static NodeSpec> {
    NODES.iter().find(|n| n.name == name)
}

pub fn handler_spec(name: &str) -> Option<&'static NodeSpec> {
    HANDLERS.iter().find(|n| n.name == name)
}

pub fn alert_property(name: &str) -> Option<&'static Property> {
    ALERT_PROPERTIES.iter().find(|p| p.name == name)
}

pub fn handlers() -> impl Iterator<Item = &'static NodeSpec> {
    HANDLERS.iter()
}

pub fn is_lambda_function(name: &str) -> bool {
    LAMBDA_FUNCTIONS.contains(&name)
}
