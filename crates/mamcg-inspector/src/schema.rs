use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use workflow_canvas::model::NodeKind;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldType {
    Text,
    /// Multi-line text.
    TextArea,
    Number,
    Boolean,
    Select { options: Vec<String> },
}

/// Where an edited value is written on the node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldTarget {
    Id,
    Label,
    Description,
    X,
    Y,
    Width,
    Height,
    /// An entry of `node.config` under this key.
    Config(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualField {
    pub id: String,
    pub label: String,
    pub description: String,
    pub field_type: FieldType,
    pub target: FieldTarget,
    pub required: bool,
    pub read_only: bool,
    pub default_value: Option<Value>,
}

impl VisualField {
    fn new(id: &str, label: &str, field_type: FieldType, target: FieldTarget) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            description: String::new(),
            field_type,
            target,
            required: false,
            read_only: false,
            default_value: None,
        }
    }

    /// A field stored in `node.config` under its own id.
    fn config(id: &str, label: &str, field_type: FieldType, default: Option<Value>) -> Self {
        Self {
            default_value: default,
            ..Self::new(id, label, field_type, FieldTarget::Config(id.to_string()))
        }
    }

    fn text(id: &str, label: &str, placeholder: &str) -> Self {
        Self {
            description: placeholder.to_string(),
            ..Self::config(id, label, FieldType::Text, None)
        }
    }

    fn select(id: &str, label: &str, options: &[&str]) -> Self {
        let options: Vec<String> = options.iter().map(|o| o.to_string()).collect();
        let default = options.first().map(|o| json!(o));
        Self::config(id, label, FieldType::Select { options }, default)
    }

    fn switch(id: &str, label: &str, default: bool) -> Self {
        Self::config(id, label, FieldType::Boolean, Some(json!(default)))
    }
}

/// Identity, text and geometry fields shown for every node.
pub fn common_fields() -> Vec<VisualField> {
    vec![
        VisualField {
            read_only: true,
            ..VisualField::new("id", "ID", FieldType::Text, FieldTarget::Id)
        },
        VisualField {
            required: true,
            description: "Nhập tên node...".to_string(),
            ..VisualField::new("label", "Tên hiển thị", FieldType::Text, FieldTarget::Label)
        },
        VisualField {
            description: "Mô tả chức năng...".to_string(),
            ..VisualField::new("description", "Mô tả", FieldType::TextArea, FieldTarget::Description)
        },
        VisualField::new("x", "X", FieldType::Number, FieldTarget::X),
        VisualField::new("y", "Y", FieldType::Number, FieldTarget::Y),
        VisualField::new("width", "Width", FieldType::Number, FieldTarget::Width),
        VisualField::new("height", "Height", FieldType::Number, FieldTarget::Height),
    ]
}

/// Type-specific settings. Connectors and unknown kinds have none.
pub fn kind_fields(kind: &NodeKind) -> Vec<VisualField> {
    match kind {
        NodeKind::Start | NodeKind::End => vec![VisualField::select(
            "triggerType",
            "Kiểu kích hoạt",
            &["manual", "auto", "scheduled", "webhook"],
        )],
        NodeKind::Process => vec![
            VisualField::select(
                "processType",
                "Loại xử lý",
                &["transcode", "thumbnail", "metadata", "watermark", "custom"],
            ),
            VisualField::text("preset", "Preset", "Nhập preset..."),
            VisualField::switch("parallel", "Xử lý song song", false),
        ],
        NodeKind::Decision => vec![
            VisualField::select(
                "condition",
                "Điều kiện",
                &["filesize", "duration", "resolution", "format", "metadata", "custom"],
            ),
            VisualField {
                default_value: Some(json!("greater")),
                ..VisualField::select(
                    "operator",
                    "Toán tử",
                    &["equal", "notequal", "greater", "less", "contains"],
                )
            },
            VisualField::text("value", "Giá trị", "Nhập giá trị..."),
        ],
        NodeKind::Input | NodeKind::Output => vec![
            VisualField::select(
                "sourceType",
                "Nguồn dữ liệu",
                &["file", "folder", "url", "api", "database"],
            ),
            VisualField::text("path", "Đường dẫn", "/path/to/files..."),
            VisualField::switch("watchFolder", "Theo dõi thư mục", false),
        ],
        NodeKind::Database => vec![
            VisualField::select(
                "dbType",
                "Loại database",
                &["mysql", "postgresql", "mongodb", "oracle"],
            ),
            VisualField::text("connectionString", "Connection string", "mongodb://..."),
            VisualField {
                field_type: FieldType::TextArea,
                ..VisualField::text("query", "Query/Collection", "SELECT * FROM...")
            },
        ],
        NodeKind::Notification => vec![
            VisualField::select(
                "channel",
                "Kênh thông báo",
                &["email", "slack", "teams", "webhook", "sms"],
            ),
            VisualField::text("recipient", "Người nhận", "email@example.com"),
            VisualField::text("subject", "Tiêu đề", "Workflow completed"),
            VisualField {
                field_type: FieldType::TextArea,
                ..VisualField::text("body", "Nội dung", "Workflow đã hoàn thành...")
            },
        ],
        NodeKind::Connector | NodeKind::Generic(_) => Vec::new(),
    }
}

/// Execution settings shared by every kind.
pub fn advanced_fields() -> Vec<VisualField> {
    vec![
        VisualField::switch("enabled", "Bật node", true),
        VisualField::switch("retryOnFailure", "Retry on failure", false),
        VisualField::switch("logOutput", "Log output", true),
        VisualField::config("timeout", "Timeout (giây)", FieldType::Number, Some(json!(300))),
    ]
}

/// The full form for a node of `kind`, in display order.
pub fn fields_for_kind(kind: &NodeKind) -> Vec<VisualField> {
    let mut fields = common_fields();
    fields.extend(kind_fields(kind));
    fields.extend(advanced_fields());
    fields
}
