pub mod adapters;
pub mod curvature;
pub mod group;
pub mod plan;
pub mod settings;
pub mod style;
pub mod summarize;

mod stopwords;

pub use adapters::{Renderer, to_cytoscape, to_svelte_flow, to_vis_network};
pub use curvature::{CurvatureAssigner, CurveAssignment, CurveType, LabelSide};
pub use group::{EdgeGrouper, EdgeGroups, EdgeKey};
pub use plan::{EdgeLabel, EdgePlan, EdgeStylePlanner, NodeDisplay, StyledEdge, traversal_order};
pub use settings::PlannerSettings;
pub use style::{Color, EdgeStyle, NodeStyle, get_edge_color, get_edge_style, get_node_style};
pub use summarize::{KeywordExtractor, Summarize, TextSummarizer, summarize};
