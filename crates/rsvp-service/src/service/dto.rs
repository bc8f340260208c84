//! 服务层数据传输对象
//!
//! 参会名单的展示结构，与存储格式解耦

use std::fmt::Write;

use serde::Serialize;

/// 单个参会者
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Attendee {
    pub name: String,
    pub email: String,
}

/// 同一邀请码下的参会者
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeGroup {
    pub code: String,
    pub attendees: Vec<Attendee>,
}

/// 按邀请码分组的完整名单
///
/// 分组按邀请码排序，组内按姓名排序
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendeeListing {
    pub total: usize,
    pub groups: Vec<CodeGroup>,
}

impl AttendeeListing {
    /// 渲染为纯文本，只包含姓名
    pub fn render_plain(&self) -> String {
        let mut out = format!("{} people are coming\n", self.total);
        for group in &self.groups {
            let _ = writeln!(out, "\n{} ({})", group.code, group.attendees.len());
            for attendee in &group.attendees {
                let _ = writeln!(out, "  {}", attendee.name);
            }
        }
        out
    }
}

/// 单个邀请码的登记情况
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeRoster {
    pub code: String,
    /// 剩余容量，邀请码不存在时为空
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining: Option<i64>,
    pub attendees: Vec<Attendee>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attendee(name: &str) -> Attendee {
        Attendee {
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
        }
    }

    #[test]
    fn test_render_plain_hides_emails() {
        let listing = AttendeeListing {
            total: 3,
            groups: vec![
                CodeGroup {
                    code: "mvps".to_string(),
                    attendees: vec![attendee("Grace")],
                },
                CodeGroup {
                    code: "rds".to_string(),
                    attendees: vec![attendee("Ada"), attendee("Linus")],
                },
            ],
        };

        let text = listing.render_plain();

        assert!(text.starts_with("3 people are coming\n"));
        assert!(text.contains("mvps (1)\n  Grace\n"));
        assert!(text.contains("rds (2)\n  Ada\n  Linus\n"));
        assert!(!text.contains('@'));
    }

    #[test]
    fn test_roster_serialization() {
        let roster = CodeRoster {
            code: "rds".to_string(),
            remaining: None,
            attendees: vec![],
        };
        let json = serde_json::to_value(&roster).unwrap();
        assert_eq!(json["code"], "rds");
        assert!(json.get("remaining").is_none());
    }
}
