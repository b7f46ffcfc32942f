pub mod analyzer;
pub mod classifier;
pub mod graph;
pub mod index;
pub mod marker;
pub mod model;
pub mod resolver;
pub mod scanner;

pub use analyzer::{AnalysisReport, AnalysisStats, FileMarkers, MarkerAnalyzer};
pub use classifier::RelationshipClassifier;
pub use graph::{GraphBuilder, HierarchyGraph, InheritanceGraph, TypeNode};
pub use index::{DeclarationIndex, InheritanceIndex, TypeResolver};
pub use marker::{
    Alignment, Anchor, AnchorKind, Framing, GutterIcon, MarkerDirective, MarkerKind, MarkerLabel,
    MarkerSink, NavigationTarget, TargetKind,
};
pub use model::{
    InheritanceEdge, InheritanceKind, MemberDeclaration, MemberKind, MemberRef, Modifier,
    NameToken, Span, TypeDeclaration, TypeKind, TypeRef, Visibility,
};
pub use resolver::{flatten_members, SupertypeResolver};
pub use scanner::FileScanner;
