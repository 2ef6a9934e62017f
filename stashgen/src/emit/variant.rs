//! The two artifact variants
//!
//! A plain artifact saves into and restores from the container directly. A renderable
//! artifact takes part in the renderable capability's own save/restore protocol, which
//! hands around an opaque parent state: the artifact wraps that state into a container on
//! save and unwraps it again on restore.
//!
//! Both variants share the per-field statements. Restore applies this type's fields and
//! then delegates to the parent. Save delegates to the parent first and then applies this
//! type's fields.

use serde::Serialize;
use strum::{AsRefStr, Display};

use super::render_template;
use crate::classify::TransferStrategy;
use crate::collect::{CollectedField, GenerationGroup};
use crate::config::GeneratorConfig;
use crate::error::Result;
use crate::hierarchy::TypeInfo;

const INDENT: &str = "        ";

const PLAIN_TEMPLATE: &str = "\
{{package}}public class {{artifact}}<T extends {{target}}> extends {{parent}}<T> {
    private static final {{helper}} H = new {{helper}}(\"{{key_prefix}}\");

    @Override
    public void restore(T target, {{container}} state) {
        if (state == null) {
            return;
        }
{{restore_fields}}        super.restore(target, state);
    }

    @Override
    public void save(T target, {{container}} state) {
        super.save(target, state);
{{save_fields}}    }
}
";

const RENDERABLE_TEMPLATE: &str = "\
{{package}}public class {{artifact}}<T extends {{target}}> extends {{parent}}<T> {
    private static final {{helper}} H = new {{helper}}(\"{{key_prefix}}\");

    @Override
    public {{parent_state}} restore(T target, {{parent_state}} p) {
        {{container}} state = ({{container}}) p;
        {{parent_state}} parent = H.getParent(state);
{{restore_fields}}        return super.restore(target, parent);
    }

    @Override
    public {{parent_state}} save(T target, {{parent_state}} p) {
        {{container}} state = H.putParent(super.save(target, p));
{{save_fields}}        return state;
    }
}
";

/// Which save/restore protocol an artifact implements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ArtifactVariant {
    /// Saves into and restores from the container directly
    Plain,
    /// Threads the opaque parent state through the container
    Renderable,
}

impl ArtifactVariant {
    /// Variant selected by the type's renderable capability
    pub const fn of(info: &TypeInfo) -> Self {
        if info.renderable {
            Self::Renderable
        } else {
            Self::Plain
        }
    }

    const fn template(self) -> &'static str {
        match self {
            Self::Plain => PLAIN_TEMPLATE,
            Self::Renderable => RENDERABLE_TEMPLATE,
        }
    }

    /// The type an artifact of this variant extends
    pub fn parent(self, info: &TypeInfo, config: &GeneratorConfig) -> String {
        match (&info.parent_artifact, self) {
            (Some(artifact), _) => artifact.to_string(),
            (None, Self::Plain) => config.plain_base.to_string(),
            (None, Self::Renderable) => config.renderable_base.to_string(),
        }
    }

    /// Render the artifact source for `group`
    pub fn render(self, group: &GenerationGroup, config: &GeneratorConfig) -> Result<String> {
        let info = &group.info;
        let package = if info.package.is_empty() {
            String::new()
        } else {
            format!("package {};\n\n", info.package)
        };
        let key_prefix = format!("{}.", info.artifact);
        let parent = self.parent(info, config);
        let restore_fields = field_statements(group, restore_statement);
        let save_fields = field_statements(group, save_statement);

        render_template(
            self.template(),
            &[
                ("package", package.as_str()),
                ("artifact", info.artifact.simple_name()),
                ("target", info.source_name.as_str()),
                ("parent", parent.as_str()),
                ("helper", config.helper_type.as_str()),
                ("key_prefix", key_prefix.as_str()),
                ("container", config.container_type.as_str()),
                ("parent_state", config.parent_state_type.as_str()),
                ("restore_fields", restore_fields.as_str()),
                ("save_fields", save_fields.as_str()),
            ],
        )
    }
}

fn field_statements(
    group: &GenerationGroup,
    statement: fn(&CollectedField, TransferStrategy) -> String,
) -> String {
    group
        .emitted_fields()
        .filter_map(|field| field.transfer().map(|strategy| statement(field, strategy)))
        .map(|line| format!("{INDENT}{line}\n"))
        .collect()
}

fn restore_statement(field: &CollectedField, strategy: TransferStrategy) -> String {
    // capability strategies return the capability type, cast back to the declared type
    let cast = if strategy.is_exact() {
        String::new()
    } else {
        format!("({}) ", field.ty)
    };
    format!(
        "target.{name} = {cast}H.{op}(state, \"{name}\");",
        name = field.name,
        op = strategy.retrieve_op()
    )
}

fn save_statement(field: &CollectedField, strategy: TransferStrategy) -> String {
    format!(
        "H.{op}(state, \"{name}\", target.{name});",
        name = field.name,
        op = strategy.store_op()
    )
}
