// Keyword families shared by the structure and operator rule tables.

pub(crate) const BOUNDARY: &[&str] = &[
    "boundary",
    "boundaries",
    "border",
    "borders",
    "outline",
    "perimeter",
    "frame",
    "edge",
    "edges",
    "hollow",
    "ring",
    "plus",
    "cardinal",
];

pub(crate) const BLOCK: &[&str] = &[
    "block",
    "blocks",
    "rectangle",
    "rectangles",
    "rectangular",
    "square",
    "squares",
    "box",
    "boxes",
    "solid",
];

pub(crate) const COLUMN: &[&str] = &["column", "columns", "col", "cols", "vertical", "vertically"];

pub(crate) const ROW: &[&str] = &["row", "rows", "horizontal", "horizontally"];

pub(crate) const ADJACENCY: &[&str] = &[
    "adjacent",
    "touching",
    "touches",
    "touch",
    "beside",
    "bordering",
    "neighboring",
    "neighbouring",
    "next",
    "near",
];

pub(crate) const PATH: &[&str] = &[
    "path",
    "paths",
    "reach",
    "reaches",
    "reachable",
    "route",
    "leads",
    "leading",
];

/// Second word of two-word path phrases such as "connected to".
pub(crate) const PATH_PAIRS: &[(&str, &str)] =
    &[("connected", "to"), ("linked", "to"), ("joined", "to")];

pub(crate) const REGION: &[&str] = &[
    "region",
    "regions",
    "blob",
    "blobs",
    "object",
    "objects",
    "shape",
    "shapes",
    "component",
    "components",
    "connected",
    "cluster",
    "clusters",
    "group",
    "groups",
    "island",
    "islands",
    "area",
    "areas",
];

pub(crate) const VALUE: &[&str] = &[
    "value", "values", "cell", "cells", "pixel", "pixels", "all", "every",
];

pub(crate) const STEP: &[&str] = &["step", "steps", "move", "moves", "hop", "hops"];

pub(crate) const CONNECTIVITY: &[&str] = &[
    "connected",
    "connectivity",
    "connection",
    "neighbor",
    "neighbors",
    "neighbour",
    "neighbours",
    "neighborhood",
    "way",
];

pub(crate) const LENGTH: &[&str] = &["long", "tall", "high", "wide", "length", "cells"];

pub(crate) const DIAGONAL: &[&str] = &["diagonal", "diagonally", "diagonals"];

pub(crate) const ORTHOGONAL: &[&str] = &["orthogonal", "orthogonally"];

pub(crate) const EXTRACT: &[&str] = &[
    "cross",
    "extract",
    "extracted",
    "outline",
    "outlined",
    "boundary",
    "border",
    "edge",
    "edges",
    "hollow",
    "perimeter",
    "contour",
    "frame",
];

pub(crate) const EMPHASIS: &[&str] = &[
    "highlight",
    "highlighted",
    "emphasize",
    "emphasise",
    "mark",
    "marked",
];

pub(crate) const MOVE: &[&str] = &[
    "move",
    "moved",
    "moves",
    "shift",
    "shifted",
    "slide",
    "slid",
    "fall",
    "falls",
    "fell",
    "drop",
    "dropped",
    "gravity",
    "compact",
    "compacted",
    "push",
    "pushed",
    "translate",
    "translated",
];

pub(crate) const FILL: &[&str] = &[
    "fill",
    "filled",
    "solid",
    "box",
    "boxed",
    "rectangle",
    "enclose",
    "enclosed",
    "bounding",
    "cover",
];

pub(crate) const ERASE: &[&str] = &[
    "remove",
    "removed",
    "erase",
    "erased",
    "delete",
    "deleted",
    "clear",
    "cleared",
    "vanish",
    "disappear",
    "disappears",
    "gone",
];

pub(crate) const RECOLOR: &[&str] = &[
    "recolor",
    "recolored",
    "recolour",
    "recoloured",
    "color",
    "colored",
    "colour",
    "coloured",
    "become",
    "becomes",
    "turn",
    "turns",
    "turned",
    "change",
    "changed",
    "changes",
    "replace",
    "replaced",
    "paint",
    "painted",
    "into",
];

pub(crate) const PRESERVE: &[&str] = &[
    "same",
    "unchanged",
    "keep",
    "kept",
    "identical",
    "only",
    "isolate",
    "isolated",
    "retain",
    "retained",
    "preserve",
    "preserved",
    "copy",
];

pub(crate) const UP: &[&str] = &["up", "upward", "upwards", "top", "north", "rise", "rises"];
pub(crate) const DOWN: &[&str] = &[
    "down", "downward", "downwards", "bottom", "south", "fall", "falls", "fell", "drop", "dropped",
    "gravity",
];
pub(crate) const LEFT: &[&str] = &["left", "leftward", "leftwards", "west"];
pub(crate) const RIGHT: &[&str] = &["right", "rightward", "rightwards", "east"];

/// ARC palette names.
pub(crate) const COLORS: &[(&str, u32)] = &[
    ("black", 0),
    ("blue", 1),
    ("red", 2),
    ("green", 3),
    ("yellow", 4),
    ("grey", 5),
    ("gray", 5),
    ("magenta", 6),
    ("pink", 6),
    ("orange", 7),
    ("azure", 8),
    ("cyan", 8),
    ("maroon", 9),
    ("brown", 9),
];
