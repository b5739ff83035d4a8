//! Console method names recognized on the wire.

use std::fmt;

use crate::style::StyleCategory;

/// A console method, parsed from the `type` column of a record.
///
/// Wire names are the camelCase strings browsers expose on the console
/// object (`"groupCollapsed"`, `"countReset"`, ...). Anything the parser
/// does not recognize is treated as `log` by the argument processor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Log,
    Debug,
    Info,
    Warn,
    Error,
    Group,
    GroupCollapsed,
    GroupEnd,
    Assert,
    Table,
    Dir,
    Dirxml,
    Trace,
    Clear,
    Count,
    CountReset,
    Time,
    TimeEnd,
    TimeLog,
}

impl Method {
    /// Every recognized method, in wire-name order.
    pub const ALL: [Method; 19] = [
        Method::Log,
        Method::Debug,
        Method::Info,
        Method::Warn,
        Method::Error,
        Method::Group,
        Method::GroupCollapsed,
        Method::GroupEnd,
        Method::Assert,
        Method::Table,
        Method::Dir,
        Method::Dirxml,
        Method::Trace,
        Method::Clear,
        Method::Count,
        Method::CountReset,
        Method::Time,
        Method::TimeEnd,
        Method::TimeLog,
    ];

    /// Parses a wire-format method name.
    pub fn parse(name: &str) -> Option<Method> {
        match name {
            "log" => Some(Method::Log),
            "debug" => Some(Method::Debug),
            "info" => Some(Method::Info),
            "warn" => Some(Method::Warn),
            "error" => Some(Method::Error),
            "group" => Some(Method::Group),
            "groupCollapsed" => Some(Method::GroupCollapsed),
            "groupEnd" => Some(Method::GroupEnd),
            "assert" => Some(Method::Assert),
            "table" => Some(Method::Table),
            "dir" => Some(Method::Dir),
            "dirxml" => Some(Method::Dirxml),
            "trace" => Some(Method::Trace),
            "clear" => Some(Method::Clear),
            "count" => Some(Method::Count),
            "countReset" => Some(Method::CountReset),
            "time" => Some(Method::Time),
            "timeEnd" => Some(Method::TimeEnd),
            "timeLog" => Some(Method::TimeLog),
            _ => None,
        }
    }

    /// The wire-format name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Log => "log",
            Method::Debug => "debug",
            Method::Info => "info",
            Method::Warn => "warn",
            Method::Error => "error",
            Method::Group => "group",
            Method::GroupCollapsed => "groupCollapsed",
            Method::GroupEnd => "groupEnd",
            Method::Assert => "assert",
            Method::Table => "table",
            Method::Dir => "dir",
            Method::Dirxml => "dirxml",
            Method::Trace => "trace",
            Method::Clear => "clear",
            Method::Count => "count",
            Method::CountReset => "countReset",
            Method::Time => "time",
            Method::TimeEnd => "timeEnd",
            Method::TimeLog => "timeLog",
        }
    }

    /// Whether this method's string and numeric arguments get auto-styled
    /// substitution patterns.
    pub fn is_formattable(&self) -> bool {
        matches!(
            self,
            Method::Debug
                | Method::Log
                | Method::Info
                | Method::Warn
                | Method::Error
                | Method::Group
                | Method::GroupCollapsed
        )
    }

    /// The style category used when auto-generating patterns for this
    /// method's string arguments. Only formattable methods carry one;
    /// `groupCollapsed` shares the `group` style.
    pub fn style_category(&self) -> Option<StyleCategory> {
        match self {
            Method::Log => Some(StyleCategory::Log),
            Method::Debug => Some(StyleCategory::Debug),
            Method::Info => Some(StyleCategory::Info),
            Method::Warn => Some(StyleCategory::Warn),
            Method::Error => Some(StyleCategory::Error),
            Method::Group | Method::GroupCollapsed => Some(StyleCategory::Group),
            _ => None,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_round_trips_every_wire_name() {
        for method in Method::ALL {
            assert_eq!(Method::parse(method.as_str()), Some(method));
        }
    }

    #[test]
    fn parse_rejects_unknown_and_wrong_case() {
        assert_eq!(Method::parse("shout"), None);
        assert_eq!(Method::parse("Log"), None);
        assert_eq!(Method::parse("groupcollapsed"), None);
        assert_eq!(Method::parse(""), None);
    }

    #[test]
    fn formattable_subset() {
        let formattable: Vec<Method> = Method::ALL
            .into_iter()
            .filter(Method::is_formattable)
            .collect();
        assert_eq!(
            formattable,
            vec![
                Method::Log,
                Method::Debug,
                Method::Info,
                Method::Warn,
                Method::Error,
                Method::Group,
                Method::GroupCollapsed,
            ]
        );
    }

    #[test]
    fn group_collapsed_shares_group_style() {
        assert_eq!(
            Method::GroupCollapsed.style_category(),
            Some(StyleCategory::Group)
        );
        assert_eq!(Method::Group.style_category(), Some(StyleCategory::Group));
        assert_eq!(Method::Table.style_category(), None);
    }
}
