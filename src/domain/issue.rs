use serde::Deserialize;
use serde_json::Value;

/// Issue payload returned by the Jira REST v3 issue endpoint, reduced to
/// the fields a scan consumes. Records missing `key`, `summary` or the
/// issue type fail deserialization and surface as malformed.
#[derive(Debug, Clone, Deserialize)]
pub struct IssueRecord {
    pub key: String,
    pub fields: IssueFields,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IssueFields {
    pub issuetype: IssueType,
    pub summary: String,
    /// Raw description document. The v3 API returns Atlassian Document
    /// Format here; kept as loose JSON so conversion can degrade instead
    /// of rejecting the record.
    #[serde(default)]
    pub description: Option<Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IssueType {
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_record_with_description() {
        let payload = json!({
            "key": "OPS-3",
            "fields": {
                "issuetype": { "name": "Bug" },
                "summary": "Fix the flaky deploy",
                "description": { "type": "doc", "version": 1, "content": [] }
            }
        });
        let record: IssueRecord = serde_json::from_value(payload).unwrap();
        assert_eq!(record.key, "OPS-3");
        assert_eq!(record.fields.issuetype.name, "Bug");
        assert!(record.fields.description.is_some());
    }

    #[test]
    fn description_defaults_to_none() {
        let payload = json!({
            "key": "OPS-4",
            "fields": {
                "issuetype": { "name": "Task" },
                "summary": "No description on this one"
            }
        });
        let record: IssueRecord = serde_json::from_value(payload).unwrap();
        assert!(record.fields.description.is_none());
    }

    #[test]
    fn missing_summary_is_rejected() {
        let payload = json!({
            "key": "OPS-5",
            "fields": { "issuetype": { "name": "Task" } }
        });
        assert!(serde_json::from_value::<IssueRecord>(payload).is_err());
    }
}
