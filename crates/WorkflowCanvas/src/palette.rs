//! # Node Palette
//!
//! Templates the host offers for drag-and-drop. Dropping a template onto the
//! canvas copies it into a fresh node.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::{Node, NodeConfig, NodeId, NodeKind};
use crate::shapes::ShapeType;

/// Palette section a template is listed under.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TemplateCategory {
    #[serde(rename = "Start/End")]
    StartEnd,
    Process,
    Decision,
    Data,
    Output,
    Special,
    Action,
}

impl fmt::Display for TemplateCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TemplateCategory::StartEnd => "Start/End",
            TemplateCategory::Process => "Process",
            TemplateCategory::Decision => "Decision",
            TemplateCategory::Data => "Data",
            TemplateCategory::Output => "Output",
            TemplateCategory::Special => "Special",
            TemplateCategory::Action => "Action",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeTemplate {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub label: String,
    pub description: String,
    pub category: TemplateCategory,
    pub shape_type: ShapeType,
    pub color: String,
    pub stroke_color: String,
    pub default_width: f32,
    pub default_height: f32,
}

impl NodeTemplate {
    /// Stamps a new node from this template at the given logical position.
    pub fn instantiate(&self, position: Vec2) -> Node {
        Node {
            id: NodeId::generate(),
            kind: self.kind.clone(),
            label: self.label.clone(),
            description: Some(self.description.clone()),
            shape_type: self.shape_type,
            color: self.color.clone(),
            stroke_color: self.stroke_color.clone(),
            x: position.x,
            y: position.y,
            width: self.default_width,
            height: self.default_height,
            config: NodeConfig::new(),
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn template(
    id: &str,
    kind: NodeKind,
    label: &str,
    description: &str,
    category: TemplateCategory,
    shape_type: ShapeType,
    colors: (&str, &str),
    size: (f32, f32),
) -> NodeTemplate {
    NodeTemplate {
        id: id.to_string(),
        kind,
        label: label.to_string(),
        description: description.to_string(),
        category,
        shape_type,
        color: colors.0.to_string(),
        stroke_color: colors.1.to_string(),
        default_width: size.0,
        default_height: size.1,
    }
}

/// The built-in palette, in display order.
#[rustfmt::skip]
pub fn default_templates() -> Vec<NodeTemplate> {
    use NodeKind as K;
    use ShapeType as S;
    use TemplateCategory as C;

    vec![
        template("start", K::Start, "Bắt đầu", "Điểm bắt đầu workflow", C::StartEnd, S::Oval, ("#ec4899", "#be185d"), (120.0, 60.0)),
        template("end", K::End, "Kết thúc", "Điểm kết thúc workflow", C::StartEnd, S::Oval, ("#ef4444", "#b91c1c"), (120.0, 60.0)),
        template("process", K::Process, "Xử lý", "Thực thi một tác vụ", C::Process, S::Process, ("#fbbf24", "#d97706"), (140.0, 70.0)),
        template("process_auto", K::Process, "Tự động hóa", "Xử lý tự động", C::Process, S::PredefinedProcess, ("#818cf8", "#4f46e5"), (140.0, 70.0)),
        template("process_manual", K::Process, "Thao tác thủ công", "Cần can thiệp thủ công", C::Process, S::ManualOperation, ("#f472b6", "#db2777"), (140.0, 70.0)),
        template("decision", K::Decision, "Quyết định", "Rẽ nhánh theo điều kiện", C::Decision, S::Decision, ("#fb923c", "#ea580c"), (140.0, 90.0)),
        template("input", K::Input, "Đầu vào", "Nhận dữ liệu", C::Data, S::InputOutput, ("#60a5fa", "#2563eb"), (140.0, 70.0)),
        template("output", K::Output, "Đầu ra", "Xuất dữ liệu", C::Data, S::InputOutput, ("#3b82f6", "#1d4ed8"), (140.0, 70.0)),
        template("document", K::Output, "Tài liệu", "File/Document", C::Data, S::Document, ("#a78bfa", "#7c3aed"), (130.0, 80.0)),
        template("database", K::Database, "Database", "Lưu trữ dữ liệu", C::Data, S::Database, ("#34d399", "#059669"), (110.0, 90.0)),
        template("display", K::Output, "Hiển thị", "Xuất ra màn hình", C::Output, S::Display, ("#5eead4", "#14b8a6"), (130.0, 80.0)),
        template("delay", K::Process, "Chờ/Trì hoãn", "Delay/Wait", C::Special, S::Delay, ("#fcd34d", "#f59e0b"), (130.0, 70.0)),
        template("merge", K::Process, "Gộp/Merge", "Hợp nhất luồng", C::Special, S::Merge, ("#c084fc", "#9333ea"), (110.0, 90.0)),
        template("connector", K::Connector, "Kết nối", "Connector", C::Special, S::Connector, ("#94a3b8", "#475569"), (60.0, 60.0)),
        template("offpage", K::Connector, "Ngoài trang", "Off-page reference", C::Special, S::OffPageConnector, ("#fb7185", "#e11d48"), (110.0, 90.0)),
        template("notification", K::Notification, "Thông báo", "Gửi thông báo", C::Action, S::Process, ("#f97316", "#c2410c"), (140.0, 70.0)),
    ]
}

/// Looks up a built-in template by id.
pub fn find_template(id: &str) -> Option<NodeTemplate> {
    default_templates().into_iter().find(|t| t.id == id)
}

/// Templates grouped by category, categories in order of first appearance.
pub fn templates_by_category() -> Vec<(TemplateCategory, Vec<NodeTemplate>)> {
    let mut groups: Vec<(TemplateCategory, Vec<NodeTemplate>)> = Vec::new();
    for template in default_templates() {
        match groups.iter_mut().find(|(c, _)| *c == template.category) {
            Some((_, list)) => list.push(template),
            None => groups.push((template.category, vec![template])),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_template_ids_are_unique() {
        let templates = default_templates();
        let mut ids: Vec<_> = templates.iter().map(|t| t.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), templates.len());
    }

    #[test]
    fn test_categories_keep_palette_order() {
        let groups = templates_by_category();
        let order: Vec<_> = groups.iter().map(|(c, _)| *c).collect();
        assert_eq!(
            order,
            vec![
                TemplateCategory::StartEnd,
                TemplateCategory::Process,
                TemplateCategory::Decision,
                TemplateCategory::Data,
                TemplateCategory::Output,
                TemplateCategory::Special,
                TemplateCategory::Action,
            ]
        );
        assert_eq!(groups[3].1.len(), 4);
    }
}
