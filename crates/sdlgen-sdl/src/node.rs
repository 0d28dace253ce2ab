//! Type-definition and field nodes.

/// Type names that satisfy the identifier requirement.
const VALID_ID_TYPES: &[&str] = &["ID", "Int"];

/// Reference from a field to the type its relation targets.
///
/// Relation fields are not rendered yet; this is the hook future relation
/// rendering attaches to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationRef {
    pub target_type: String,
}

/// A single field line of a type block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldNode {
    pub name: String,
    /// Rendered type string; empty when the column was unclassifiable.
    pub type_name: String,
    pub is_required: bool,
    pub directives: Vec<String>,
    pub is_id_field: bool,
    /// Diagnostic comment appended to the field line.
    pub comment: Option<String>,
    pub render_commented: bool,
    pub relation: Option<RelationRef>,
}

impl FieldNode {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        type_name: impl Into<String>,
        is_required: bool,
        directives: Vec<String>,
        is_id_field: bool,
        comment: Option<String>,
        render_commented: bool,
        relation: Option<RelationRef>,
    ) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            is_required,
            directives,
            is_id_field,
            comment,
            render_commented,
            relation,
        }
    }

    /// Whether this field satisfies the identifier requirement: marked as
    /// the id field, of an identifier-capable type, and required.
    pub fn is_id_eligible(&self) -> bool {
        self.is_id_field
            && VALID_ID_TYPES.contains(&self.type_name.as_str())
            && self.is_required
    }

    fn render_line(&self, force_commented: bool) -> String {
        let marker = if force_commented || self.render_commented {
            "# "
        } else {
            ""
        };
        let required = if self.is_required { "!" } else { "" };
        let comment = self
            .comment
            .as_deref()
            .map(|c| format!("  # {c}"))
            .unwrap_or_default();

        format!(
            "{marker}  {}{}{required}{comment}",
            self.name, self.type_name
        )
    }
}

/// A type-definition block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeNode {
    pub name: String,
    pub fields: Vec<FieldNode>,
    pub directives: Vec<String>,
    /// Forces the whole block into the commented state even when valid.
    pub render_commented: bool,
}

impl TypeNode {
    pub fn new(
        name: impl Into<String>,
        fields: Vec<FieldNode>,
        directives: Vec<String>,
        render_commented: bool,
    ) -> Self {
        Self {
            name: name.into(),
            fields,
            directives,
            render_commented,
        }
    }

    pub fn add_field(&mut self, field: FieldNode) {
        self.fields.push(field);
    }

    /// A type is valid when at least one of its fields can serve as the
    /// identifier.
    pub fn is_valid(&self) -> bool {
        self.fields.iter().any(FieldNode::is_id_eligible)
    }

    /// Render this type as a block of lines.
    ///
    /// Field order is: id field first, then non-relation scalar fields
    /// alphabetically, then relation fields. The relation-field list is
    /// deliberately empty until relation rendering exists, so fields
    /// carrying a relation are not emitted.
    pub fn render(&self) -> String {
        let force_commented = self.render_commented || !self.is_valid();

        let id_field = self.fields.iter().find(|f| f.is_id_field);
        let mut scalar_fields: Vec<&FieldNode> = self
            .fields
            .iter()
            .filter(|f| !f.is_id_field && f.relation.is_none())
            .collect();
        scalar_fields.sort_by(|a, b| a.name.cmp(&b.name));

        let relation_fields: Vec<&FieldNode> = Vec::new();

        let mut ordered: Vec<&FieldNode> = Vec::new();
        ordered.extend(id_field);
        ordered.extend(scalar_fields);
        ordered.extend(relation_fields);

        let marker = if force_commented { "# " } else { "" };
        let mut header = format!("type {}", capitalize_first(&self.name));
        if !self.directives.is_empty() {
            header.push(' ');
            header.push_str(&self.directives.join(" "));
        }

        let mut lines = Vec::with_capacity(ordered.len() + 2);
        lines.push(format!("{marker}{header} {{"));
        for field in ordered {
            lines.push(field.render_line(force_commented));
        }
        lines.push(format!("{marker}}}"));
        lines.join("\n")
    }
}

/// The full rendered document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SdlDocument {
    pub types: Vec<TypeNode>,
}

impl SdlDocument {
    pub fn new(types: Vec<TypeNode>) -> Self {
        Self { types }
    }

    /// Render all type blocks, alphabetically by name, separated by blank
    /// lines. Deterministic for a given set of types.
    pub fn render(&self) -> String {
        let mut ordered: Vec<&TypeNode> = self.types.iter().collect();
        ordered.sort_by(|a, b| a.name.cmp(&b.name));

        ordered
            .iter()
            .map(|t| t.render())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

fn capitalize_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
