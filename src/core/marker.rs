use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::model::{MemberRef, Span, TypeDeclaration};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MarkerKind {
    Overrides,
    Implements,
    ImplementedBy,
    OverriddenBy,
    HasSubclasses,
}

impl MarkerKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MarkerKind::Overrides => "OVERRIDES",
            MarkerKind::Implements => "IMPLEMENTS",
            MarkerKind::ImplementedBy => "IMPLEMENTED_BY",
            MarkerKind::OverriddenBy => "OVERRIDDEN_BY",
            MarkerKind::HasSubclasses => "HAS_SUBCLASSES",
        }
    }

    /// Markers pointing up the hierarchy sit on the left of the gutter.
    pub fn alignment(self) -> Alignment {
        match self {
            MarkerKind::Overrides | MarkerKind::Implements => Alignment::Left,
            MarkerKind::ImplementedBy | MarkerKind::OverriddenBy | MarkerKind::HasSubclasses => {
                Alignment::Right
            }
        }
    }
}

/// Placement hint for the renderer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    Left,
    Right,
}

/// Whether a marker is worded as implementation or as overriding.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Framing {
    Implemented,
    Overridden,
}

impl Framing {
    pub fn for_type(decl: &TypeDeclaration) -> Self {
        if decl.is_interface() {
            Framing::Implemented
        } else {
            Framing::Overridden
        }
    }
}

/// Gutter icon the host should draw.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum GutterIcon {
    OverridingMethod,
    ImplementingMethod,
    OverriddenMethod,
    ImplementedMethod,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AnchorKind {
    MemberName,
    TypeName,
}

/// The name token a marker is attached to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Anchor {
    pub kind: AnchorKind,
    /// Qualified name of the declaring type (or the type itself).
    pub owner: String,
    pub name: String,
    pub span: Span,
    pub file_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TargetKind {
    Member,
    Type,
}

/// A declaration the user can jump to from a marker.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NavigationTarget {
    pub kind: TargetKind,
    pub owner: String,
    pub name: String,
    pub span: Span,
    pub file_path: Option<PathBuf>,
}

impl NavigationTarget {
    /// Returns `None` for unnamed members, which can never be targets.
    pub fn member(member: MemberRef<'_>) -> Option<Self> {
        let token = member.member.name.as_ref()?;
        Some(Self {
            kind: TargetKind::Member,
            owner: member.owner.qualified_name.clone(),
            name: token.text.clone(),
            span: token.span,
            file_path: member.owner.file_path.clone(),
        })
    }

    pub fn of_type(decl: &TypeDeclaration) -> Self {
        let (name, span) = match &decl.name {
            Some(token) => (token.text.clone(), token.span),
            None => (decl.simple_name().to_string(), Span::default()),
        };
        Self {
            kind: TargetKind::Type,
            owner: decl.qualified_name.clone(),
            name,
            span,
            file_path: decl.file_path.clone(),
        }
    }

    /// `owner.name` for members, the qualified name for types.
    pub fn display_name(&self) -> String {
        match self.kind {
            TargetKind::Member => format!("{}.{}", self.owner, self.name),
            TargetKind::Type => self.owner.clone(),
        }
    }
}

/// Parameters for the host to build its label text from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MarkerLabel {
    /// Member name, or the type's simple name for type-level markers.
    pub subject: String,
    /// Supertype qualified name for OVERRIDES / IMPLEMENTS.
    pub related_type: Option<String>,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MarkerDirective {
    pub anchor: Anchor,
    pub alignment: Alignment,
    pub kind: MarkerKind,
    pub framing: Framing,
    pub label: MarkerLabel,
    pub targets: Vec<NavigationTarget>,
}

impl MarkerDirective {
    pub fn icon(&self) -> GutterIcon {
        match self.kind {
            MarkerKind::Overrides => GutterIcon::OverridingMethod,
            MarkerKind::Implements => GutterIcon::ImplementingMethod,
            MarkerKind::ImplementedBy => GutterIcon::ImplementedMethod,
            MarkerKind::OverriddenBy => GutterIcon::OverriddenMethod,
            MarkerKind::HasSubclasses => match self.framing {
                Framing::Implemented => GutterIcon::ImplementedMethod,
                Framing::Overridden => GutterIcon::OverriddenMethod,
            },
        }
    }

    /// Default English hover text.
    pub fn tooltip(&self) -> String {
        let related = self.label.related_type.as_deref().unwrap_or("?");
        match self.kind {
            MarkerKind::Overrides => {
                format!("Overrides method '{}' in {}", self.label.subject, related)
            }
            MarkerKind::Implements => {
                format!("Implements method '{}' in {}", self.label.subject, related)
            }
            MarkerKind::ImplementedBy => format!("Implemented by {}", self.label.count),
            MarkerKind::OverriddenBy => format!("Overridden by {}", self.label.count),
            MarkerKind::HasSubclasses => match self.framing {
                Framing::Implemented => format!("Implemented by {} types", self.label.count),
                Framing::Overridden => format!("Subclassed by {} types", self.label.count),
            },
        }
    }

    /// Title of the pick-list shown when the marker is clicked.
    pub fn navigation_title(&self) -> String {
        let subject = &self.label.subject;
        let count = self.label.count;
        match self.kind {
            MarkerKind::Overrides | MarkerKind::Implements => {
                format!("Choose super method of {}", subject)
            }
            MarkerKind::ImplementedBy => {
                format!("Choose implementation of {} ({} methods found)", subject, count)
            }
            MarkerKind::OverriddenBy => {
                format!("Choose overriding method of {} ({} methods found)", subject, count)
            }
            MarkerKind::HasSubclasses => match self.framing {
                Framing::Implemented => {
                    format!("Choose implementation of {} ({} types found)", subject, count)
                }
                Framing::Overridden => {
                    format!("Choose subclass of {} ({} classes found)", subject, count)
                }
            },
        }
    }
}

/// Consumer of classification results, supplied by the host.
pub trait MarkerSink {
    fn accept(&mut self, marker: MarkerDirective);
}

impl MarkerSink for Vec<MarkerDirective> {
    fn accept(&mut self, marker: MarkerDirective) {
        self.push(marker);
    }
}

impl<S: MarkerSink + ?Sized> MarkerSink for &mut S {
    fn accept(&mut self, marker: MarkerDirective) {
        (**self).accept(marker)
    }
}
