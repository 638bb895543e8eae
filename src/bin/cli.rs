//! CLI for inspecting a 68-point landmark detection.
//!
//! Usage:
//!   landmark-mesh face.json --image photo.jpg            # Human-readable output
//!   landmark-mesh face.json --width 640 --height 480 --json
//!   landmark-mesh face.json --image photo.jpg --mesh --overlay preview.png
//!   landmark-mesh --width 640 --height 480 --mesh        # Generic face, no input file

use clap::{Parser, ValueEnum};
use image::{GenericImageView, Rgba, RgbaImage};
use landmark_mesh::{
    mean_face_in, render, Error, Feature, InputInfo, Landmarks, Mesh, Orientation, Point,
    Polyline, Rect, Result, Shape, TexCoords,
};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Features reported when none are requested.
const DEFAULT_FEATURES: [Feature; 9] = [
    Feature::Jaw,
    Feature::LeftEyebrow,
    Feature::RightEyebrow,
    Feature::NoseBridge,
    Feature::NoseBase,
    Feature::LeftEye,
    Feature::RightEye,
    Feature::OuterMouth,
    Feature::InnerMouth,
];

#[derive(Parser, Debug)]
#[command(name = "landmark-mesh")]
#[command(author, version, about = "Feature outlines and meshes from facial landmarks", long_about = None)]
struct Args {
    /// Landmark JSON file: {"points": [{"x":..,"y":..}, ...]} or [[x, y], ...].
    /// Without it a generic face centered in the image is used.
    input: Option<PathBuf>,

    /// Source image; sets the image size and is the overlay background
    #[arg(long)]
    image: Option<PathBuf>,

    /// Image width, when no --image is given
    #[arg(long, requires = "height", required_unless_present = "image")]
    width: Option<u32>,

    /// Image height, when no --image is given
    #[arg(long, requires = "width")]
    height: Option<u32>,

    /// Clockwise rotation (0, 90, 180, 270) the detector input had relative to the image
    #[arg(long, default_value = "0", allow_negative_numbers = true)]
    rotate: i32,

    /// Feature to report (repeatable), e.g. left-eye, outer-mouth, face-outline
    #[arg(short, long = "feature", value_parser = parse_feature)]
    features: Vec<Feature>,

    /// Build the Delaunay mesh
    #[arg(long)]
    mesh: bool,

    /// Texture coordinate mode for the mesh
    #[arg(long, value_enum, default_value = "normalized")]
    tex_coords: TexCoordsArg,

    /// Output as JSON
    #[arg(short, long)]
    json: bool,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write a PNG preview with outlines and mesh drawn over the image
    #[arg(long)]
    overlay: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum TexCoordsArg {
    Normalized,
    Pixels,
}

impl From<TexCoordsArg> for TexCoords {
    fn from(arg: TexCoordsArg) -> Self {
        match arg {
            TexCoordsArg::Normalized => TexCoords::Normalized,
            TexCoordsArg::Pixels => TexCoords::Pixels,
        }
    }
}

fn parse_feature(s: &str) -> std::result::Result<Feature, String> {
    s.parse::<Feature>().map_err(|e| e.to_string())
}

/// Output structure for JSON serialization
#[derive(Serialize)]
struct Output {
    input: String,
    width: u32,
    height: u32,
    rotate: i32,
    landmark_count: usize,
    features: Vec<FeatureOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    mesh: Option<MeshOutput>,
}

#[derive(Serialize)]
struct FeatureOutput {
    name: String,
    closed: bool,
    perimeter: f32,
    area: f32,
    points: Vec<Point>,
}

impl FeatureOutput {
    fn new(feature: Feature, polyline: &Polyline) -> Self {
        Self {
            name: feature.to_string(),
            closed: polyline.is_closed(),
            perimeter: polyline.perimeter(),
            area: polyline.area(),
            points: polyline.vertices().to_vec(),
        }
    }
}

#[derive(Serialize)]
struct MeshOutput {
    tex_coords: TexCoords,
    vertex_count: usize,
    triangle_count: usize,
    vertices: Vec<Point>,
    uvs: Vec<Point>,
    triangles: Vec<[usize; 3]>,
}

impl MeshOutput {
    fn new(mesh: &Mesh, tex_coords: TexCoords) -> Self {
        Self {
            tex_coords,
            vertex_count: mesh.num_vertices(),
            triangle_count: mesh.num_triangles(),
            vertices: mesh.vertices().to_vec(),
            uvs: mesh.tex_coords().to_vec(),
            triangles: mesh.triangles().collect(),
        }
    }
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: &Args) -> Result<()> {
    // Image size and optional background
    let background = match &args.image {
        Some(path) => {
            debug!(image = %path.display(), "loading image");
            Some(image::open(path)?)
        }
        None => None,
    };
    // clap requires --width/--height without --image; a missing pair is rejected as 0x0
    let (width, height) = match &background {
        Some(img) => img.dimensions(),
        None => args.width.zip(args.height).unwrap_or((0, 0)),
    };

    let orientation =
        Orientation::from_degrees(args.rotate).ok_or(Error::InvalidRotation(args.rotate))?;
    let info = InputInfo::with_orientation(width, height, orientation)?;

    // Landmarks
    let (input_name, shape) = match &args.input {
        Some(path) => {
            debug!(input = %path.display(), "loading landmarks");
            let text = std::fs::read_to_string(path)?;
            (path.display().to_string(), Shape::from_json_str(&text)?)
        }
        None => {
            info!("no landmark file given, using a generic face");
            ("<generic face>".to_string(), generic_face(width, height))
        }
    };
    let landmarks = Landmarks::new(shape, &info)?;

    let features: &[Feature] = if args.features.is_empty() {
        &DEFAULT_FEATURES
    } else {
        &args.features
    };
    let outlines: Vec<(Feature, Polyline)> = features
        .iter()
        .map(|&f| (f, landmarks.image_feature(f)))
        .collect();

    let tex_coords = TexCoords::from(args.tex_coords);
    let mesh = args.mesh.then(|| landmarks.image_mesh(tex_coords));

    if let Some(path) = &args.overlay {
        let mut canvas = match &background {
            Some(img) => img.to_rgba8(),
            None => RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 255])),
        };
        if let Some(mesh) = &mesh {
            render::draw_mesh(&mut canvas, mesh, Rgba([96, 96, 96, 255]));
        }
        for (_, outline) in &outlines {
            render::draw_polyline(&mut canvas, outline, Rgba([0, 255, 255, 255]));
        }
        render::draw_points(&mut canvas, &landmarks.image_points(), 2, Rgba([255, 0, 0, 255]));
        canvas.save(path)?;
        info!(overlay = %path.display(), "overlay written");
    }

    let output = Output {
        input: input_name,
        width,
        height,
        rotate: args.rotate,
        landmark_count: landmarks.num_points(),
        features: outlines
            .iter()
            .map(|(f, outline)| FeatureOutput::new(*f, outline))
            .collect(),
        mesh: mesh.as_ref().map(|m| MeshOutput::new(m, tex_coords)),
    };

    // Generate output
    let output_str = if args.json {
        serde_json::to_string_pretty(&output)?
    } else {
        format_human_readable(&output)
    };

    // Write output
    if let Some(ref path) = args.output {
        std::fs::write(path, &output_str)?;
        info!(output = %path.display(), "output written");
    } else {
        println!("{}", output_str);
    }

    Ok(())
}

/// Generic face filling the central part of the image.
fn generic_face(width: u32, height: u32) -> Shape {
    let side = width.min(height) as f32 * 0.6;
    let face_box = Rect::new(
        (width as f32 - side) / 2.0,
        (height as f32 - side) / 2.0,
        side,
        side,
    );
    mean_face_in(face_box)
}

fn format_human_readable(output: &Output) -> String {
    let mut s = String::new();

    s.push_str(&format!("Input: {}\n", output.input));
    s.push_str(&format!(
        "Image: {}x{} (rotated {} deg for detection)\n",
        output.width, output.height, output.rotate
    ));
    s.push_str(&format!("Landmarks: {} points\n", output.landmark_count));

    s.push_str("\nFeatures:\n");
    for feature in &output.features {
        let kind = if feature.closed { "closed" } else { "open" };
        s.push_str(&format!(
            "  {:<14} {:>2} pts {:<6} perimeter {:>8.1}px",
            feature.name,
            feature.points.len(),
            kind,
            feature.perimeter
        ));
        if feature.closed {
            s.push_str(&format!("  area {:>9.1}px^2", feature.area));
        }
        s.push('\n');
    }

    if let Some(mesh) = &output.mesh {
        s.push_str("\nMesh:\n");
        s.push_str(&format!("  Vertices:   {}\n", mesh.vertex_count));
        s.push_str(&format!("  Triangles:  {}\n", mesh.triangle_count));
        let mode = match mesh.tex_coords {
            TexCoords::Normalized => "normalized",
            TexCoords::Pixels => "pixels",
        };
        s.push_str(&format!("  Tex coords: {}\n", mode));
    }

    s
}
