//! Region pages as a typed document tree.
//!
//! Pages are built here and turned into Markdown by [`crate::markdown`].
//! Region names only ever land in [`Inline::Text`] nodes or in JSON string
//! literals inside code blocks, so they are escaped wherever they appear.

use courtmap_core::{Region, RegionKind};

const MAP_WIDTH: u32 = 600;
const MAP_HEIGHT: u32 = 400;
const DISTRICT_MAP_PADDING: u32 = 20;

/// A complete page, written to `<slug>.md`.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub slug: String,
    pub blocks: Vec<Block>,
}

impl Page {
    pub fn file_name(&self) -> String {
        format!("{}.md", self.slug)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Heading { level: u8, content: Vec<Inline> },
    Paragraph(Vec<Inline>),
    /// Fenced code block evaluated by the site at view time.
    Code { lang: &'static str, source: String },
    Html(Element),
    List(Vec<Vec<Inline>>),
    Rule,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Inline {
    Text(String),
    /// Expression interpolated by the site at view time, e.g. `circuit.name`.
    Expr(String),
    Link { text: String, href: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: &'static str,
    pub class: Option<&'static str>,
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Inline(Inline),
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            class: None,
            children: Vec::new(),
        }
    }

    pub fn class(mut self, class: &'static str) -> Self {
        self.class = Some(class);
        self
    }

    pub fn child(mut self, element: Element) -> Self {
        self.children.push(Node::Element(element));
        self
    }

    pub fn inline(mut self, inline: Inline) -> Self {
        self.children.push(Node::Inline(inline));
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.inline(Inline::Text(text.into()))
    }
}

fn text(s: impl Into<String>) -> Inline {
    Inline::Text(s.into())
}

// ── Map styling ──

/// How the projection is fitted to the feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fit {
    /// Fill the whole canvas.
    Size,
    /// Leave a margin of this many pixels on every side.
    Extent(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapStyle {
    pub fit: Fit,
    pub fill: &'static str,
    pub stroke: &'static str,
    pub stroke_width: u32,
    pub background: Option<&'static str>,
}

impl MapStyle {
    pub fn for_kind(kind: RegionKind) -> Self {
        match kind {
            RegionKind::Circuit => Self {
                fit: Fit::Size,
                fill: "#d4e6f1",
                stroke: "#2874a6",
                stroke_width: 2,
                background: Some("#f9f9f9"),
            },
            RegionKind::District => Self {
                fit: Fit::Extent(DISTRICT_MAP_PADDING),
                fill: "#e0e0e0",
                stroke: "#4a90e2",
                stroke_width: 2,
                background: None,
            },
        }
    }
}

/// Placeholder cards shown under "Information" until real data is wired in.
fn info_cards(kind: RegionKind) -> &'static [(&'static str, &'static str)] {
    match kind {
        RegionKind::Circuit => &[
            ("Member Districts", "Information about member districts will be added here."),
            ("Circuit Judges", "Judge information will be added here."),
            ("Court Locations", "Court location information will be added here."),
        ],
        RegionKind::District => &[
            ("District Judges", "Judge information will be added here."),
            ("Circuit Court", "Parent circuit information will be added here."),
            ("Court Locations", "Courthouse location information will be added here."),
            ("Caseload Statistics", "Case statistics will be added here."),
        ],
    }
}

// ── Builders ──

/// Page-side identifiers for one region kind (`allCircuits`, `circuitFeature`, ...).
struct Names {
    var: &'static str,
    all: String,
    geojson: String,
    slug: String,
    feature: String,
}

impl Names {
    fn new(kind: RegionKind) -> Self {
        let var = kind.singular();
        Self {
            var,
            all: format!("all{}", kind.group_title()),
            geojson: format!("{}GeoJSON", kind.dir_name()),
            slug: format!("{var}Slug"),
            feature: format!("{var}Feature"),
        }
    }
}

/// JSON string literal, safe to paste into page-side JavaScript.
fn js_string(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| String::from("\"\""))
}

fn attachments_block(kind: RegionKind, names: &Names) -> Block {
    let source = format!(
        "// Load all {group} data\n\
         const {all} = await FileAttachment({loader}).json();\n\
         const {geojson} = await FileAttachment({data}).json();",
        group = kind.dir_name(),
        all = names.all,
        geojson = names.geojson,
        loader = js_string(&format!("../data/{}", kind.loader_file())),
        data = js_string(&format!("../data/{}", kind.data_file())),
    );
    Block::Code { lang: "js", source }
}

fn lookup_block(kind: RegionKind, names: &Names, region: &Region) -> Block {
    let source = format!(
        "// Find this {var}\n\
         const {slug_var} = {slug};\n\
         const {var} = {all}.find(r => r.slug === {slug_var});\n\
         const {feature} = {geojson}.features.find(f =>\n  \
         f.properties[{key}] === {var}.name\n\
         );",
        var = names.var,
        slug_var = names.slug,
        slug = js_string(&region.slug),
        all = names.all,
        feature = names.feature,
        geojson = names.geojson,
        key = js_string(kind.name_key()),
    );
    Block::Code { lang: "js", source }
}

fn map_block(names: &Names, style: MapStyle) -> Block {
    let fit = match style.fit {
        Fit::Size => format!(".fitSize([width, height], {})", names.feature),
        Fit::Extent(pad) => format!(
            ".fitExtent([[{pad}, {pad}], [width - {pad}, height - {pad}]], {})",
            names.feature
        ),
    };
    let css = match style.background {
        Some(bg) => format!("max-width: 100%; height: auto; background: {bg};"),
        None => String::from("max-width: 100%; height: auto;"),
    };
    let source = format!(
        "// Create map showing just this {var}\n\
         const width = {MAP_WIDTH};\n\
         const height = {MAP_HEIGHT};\n\
         \n\
         const projection = d3.geoAlbersUsa()\n  {fit};\n\
         \n\
         const path = d3.geoPath().projection(projection);\n\
         \n\
         const svg = d3.create(\"svg\")\n  \
         .attr(\"width\", width)\n  \
         .attr(\"height\", height)\n  \
         .attr(\"viewBox\", [0, 0, width, height])\n  \
         .attr(\"style\", {css});\n\
         \n\
         svg.append(\"path\")\n  \
         .datum({feature})\n  \
         .attr(\"d\", path)\n  \
         .attr(\"fill\", {fill})\n  \
         .attr(\"stroke\", {stroke})\n  \
         .attr(\"stroke-width\", {width});\n\
         \n\
         display(svg.node());",
        var = names.var,
        css = js_string(&css),
        feature = names.feature,
        fill = js_string(style.fill),
        stroke = js_string(style.stroke),
        width = style.stroke_width,
    );
    Block::Code { lang: "js", source }
}

fn header_block(kind: RegionKind, names: &Names) -> Block {
    let (header, intro) = match kind {
        RegionKind::Circuit => ("circuit-header", "circuit-intro"),
        RegionKind::District => ("district-header", "district-intro"),
    };
    Block::Html(
        Element::new("div").class(header).child(
            Element::new("p")
                .class(intro)
                .text("The ")
                .inline(Inline::Expr(format!("{}.name", names.var)))
                .text(format!(" is {}", kind.description())),
        ),
    )
}

fn info_block(kind: RegionKind) -> Block {
    let grid = info_cards(kind).iter().fold(
        Element::new("div").class("info-grid"),
        |grid, (title, body)| {
            grid.child(
                Element::new("div")
                    .class("info-card")
                    .child(Element::new("h3").text(*title))
                    .child(Element::new("p").text(*body)),
            )
        },
    );
    Block::Html(grid)
}

/// Build the page for one region.
pub fn build_page(kind: RegionKind, region: &Region) -> Page {
    let names = Names::new(kind);
    let blocks = vec![
        Block::Heading {
            level: 1,
            content: vec![text(&region.name)],
        },
        attachments_block(kind, &names),
        lookup_block(kind, &names, region),
        Block::Heading {
            level: 2,
            content: vec![Inline::Expr(format!("{}.name", names.var))],
        },
        header_block(kind, &names),
        map_block(&names, MapStyle::for_kind(kind)),
        Block::Heading {
            level: 2,
            content: vec![text("Information")],
        },
        info_block(kind),
        Block::Rule,
        Block::Paragraph(vec![Inline::Link {
            text: format!("← Back to all {}", kind.dir_name()),
            href: String::from("./index"),
        }]),
    ];
    Page {
        slug: region.slug.clone(),
        blocks,
    }
}

/// Build the group index linking every region page, in input order.
pub fn build_index(kind: RegionKind, regions: &[Region]) -> Page {
    let noun = if regions.len() == 1 {
        kind.singular().to_string()
    } else {
        kind.dir_name().to_string()
    };
    let items = regions
        .iter()
        .map(|r| {
            vec![Inline::Link {
                text: r.name.clone(),
                href: format!("./{}", r.slug),
            }]
        })
        .collect();
    Page {
        slug: String::from("index"),
        blocks: vec![
            Block::Heading {
                level: 1,
                content: vec![text(kind.group_title())],
            },
            Block::Paragraph(vec![text(format!("{} federal judicial {noun}.", regions.len()))]),
            Block::List(items),
        ],
    }
}
