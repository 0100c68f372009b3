//! Outcome messages produced by commands.

use serde::Serialize;

use objadm_proto::{IdpListItem, PolicyAssociationReq, PolicyOp, PrincipalKind};

use crate::output::{pretty_json, Message};
use crate::style::{rounded_border, display_width, Align, Style, Theme};

const STATUS_SUCCESS: &str = "success";

// ----- idp set -----

/// Result of applying an IDP configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigSetMessage {
    status: &'static str,
    #[serde(rename = "targetAlias")]
    pub target_alias: String,
    /// The server must be restarted before the change takes effect.
    pub restart: bool,
}

impl ConfigSetMessage {
    pub fn new(target_alias: impl Into<String>, restart: bool) -> Self {
        Self {
            status: STATUS_SUCCESS,
            target_alias: target_alias.into(),
            restart,
        }
    }
}

impl Message for ConfigSetMessage {
    fn to_json(&self) -> serde_json::Result<String> {
        pretty_json(self)
    }

    fn render(&self, theme: &Theme) -> String {
        let mut text = "Successfully applied new settings.".to_string();
        if self.restart {
            text.push_str(&format!(
                "\nPlease restart the server `{}` for the changes to take effect.",
                self.target_alias
            ));
        }
        theme.colorize(&text, theme.success)
    }
}

// ----- policy attach / detach -----

/// One policy attached to, or detached from, a principal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PolicyMessage {
    status: &'static str,
    pub op: PolicyOp,
    #[serde(rename = "Policy")]
    pub policy: String,
    #[serde(rename = "UserOrGroup")]
    pub user_or_group: String,
    #[serde(rename = "IsGroup")]
    pub is_group: bool,
}

impl PolicyMessage {
    /// One message per policy of a completed request, in request order.
    pub fn for_request(op: PolicyOp, req: &PolicyAssociationReq) -> Vec<Self> {
        let is_group = req.principal_kind() == PrincipalKind::Group;
        req.policies
            .iter()
            .map(|policy| Self {
                status: STATUS_SUCCESS,
                op,
                policy: policy.clone(),
                user_or_group: req.principal().to_string(),
                is_group,
            })
            .collect()
    }

    fn principal_kind(&self) -> PrincipalKind {
        if self.is_group {
            PrincipalKind::Group
        } else {
            PrincipalKind::User
        }
    }
}

impl Message for PolicyMessage {
    fn to_json(&self) -> serde_json::Result<String> {
        pretty_json(self)
    }

    fn render(&self, theme: &Theme) -> String {
        let policy = theme.colorize(&format!("`{}`", self.policy), theme.emphasis);
        let ok = |s: &str| theme.colorize(s, theme.success);
        format!(
            "{}{}{}",
            ok("Policy "),
            policy,
            ok(&format!(
                " is {} {} {} `{}`.",
                self.op.past_tense(),
                match self.op {
                    PolicyOp::Attach => "to",
                    PolicyOp::Detach => "from",
                },
                self.principal_kind().as_str(),
                self.user_or_group
            )),
        )
    }
}

// ----- idp list -----

const ENABLED_WIDTH: usize = 5;
const ENABLED_ON: &str = "🟢";
const ENABLED_OFF: &str = "🔴";
const DEFAULT_LABEL: &str = "(default)";
const HEADERS: [&str; 3] = ["On?", "Name", "RoleARN"];
const CELL_PADDING: usize = 2;

/// Listing of the configurations of one IDP type, in server order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct IdpConfigList(pub Vec<IdpListItem>);

/// Column widths of the listing table, padding included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnWidths {
    pub enabled: usize,
    pub name: usize,
    pub role_arn: usize,
}

impl ColumnWidths {
    pub fn measure(items: &[IdpListItem]) -> Self {
        let mut name = display_width(HEADERS[1]);
        let mut role_arn = "RoleArn".len();
        for item in items {
            name = name.max(display_width(display_name(item)));
            role_arn = role_arn.max(display_width(&item.role_arn));
        }
        Self {
            enabled: ENABLED_WIDTH,
            name: name + CELL_PADDING,
            role_arn: role_arn + CELL_PADDING,
        }
    }
}

fn display_name(item: &IdpListItem) -> &str {
    if item.is_default() {
        DEFAULT_LABEL
    } else {
        &item.name
    }
}

impl IdpConfigList {
    fn column_styles(widths: &ColumnWidths, theme: &Theme) -> [Style; 3] {
        [
            Style::new().align(Align::Center).padding(1, 1).width(widths.enabled),
            Style::new().align(Align::Right).padding(1, 1).width(widths.name),
            Style::new()
                .align(Align::Left)
                .padding(1, 1)
                .fg(theme.accent)
                .width(widths.role_arn),
        ]
    }

    /// Rendered rows, header first, without the border.
    pub fn rows(&self, theme: &Theme) -> Vec<String> {
        let widths = ColumnWidths::measure(&self.0);
        let styles = Self::column_styles(&widths, theme);

        let header: String = HEADERS
            .iter()
            .zip(styles.iter())
            .map(|(hdr, style)| {
                style
                    .clone()
                    .bold(true)
                    .fg(theme.header)
                    .align(Align::Center)
                    .render(hdr, theme)
            })
            .collect();

        let mut lines = vec![header];
        for item in &self.0 {
            let enabled = if item.enabled { ENABLED_ON } else { ENABLED_OFF };
            let name = if item.is_default() {
                styles[1].clone().faint(true).render(DEFAULT_LABEL, theme)
            } else {
                styles[1].render(&item.name, theme)
            };
            lines.push(format!(
                "{}{}{}",
                styles[0].render(enabled, theme),
                name,
                styles[2].render(&item.role_arn, theme)
            ));
        }
        lines
    }
}

impl Message for IdpConfigList {
    fn to_json(&self) -> serde_json::Result<String> {
        pretty_json(self)
    }

    fn render(&self, theme: &Theme) -> String {
        rounded_border(&self.rows(theme))
    }
}

// ----- outcome -----

/// Any message a command can produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    ConfigSet(ConfigSetMessage),
    Policy(PolicyMessage),
    IdpList(IdpConfigList),
}

impl Outcome {
    fn message(&self) -> &dyn Message {
        match self {
            Self::ConfigSet(m) => m,
            Self::Policy(m) => m,
            Self::IdpList(m) => m,
        }
    }
}

impl Message for Outcome {
    fn to_json(&self) -> serde_json::Result<String> {
        self.message().to_json()
    }

    fn render(&self, theme: &Theme) -> String {
        self.message().render(theme)
    }
}
