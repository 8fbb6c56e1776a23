use std::error::Error;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use sw_core::{HandleId, Value};
use sw_devices::{DeviceCategory, EmulatedRio};
use sw_graph::{AnchorKind, Graph};
use sw_project::WiringDoc;
use sw_sim::{FlowBank, LoopbackSim};
use sw_wiring::{build_default, compile};

#[derive(Parser)]
#[command(name = "sw-cli")]
#[command(about = "Simwire CLI - robot simulator wiring tool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a wiring document's syntax and referential integrity
    Validate {
        /// Path to the wiring JSON or YAML file
        path: PathBuf,
    },
    /// Summarize the contents of a wiring document
    Show {
        /// Path to the wiring JSON or YAML file
        path: PathBuf,
    },
    /// Build, wire, compile, and tick an emulated demo assembly
    Demo {
        /// Number of simulation steps to run
        #[arg(short, long, default_value_t = 5)]
        steps: u32,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Validate { path } => cmd_validate(&path),
        Commands::Show { path } => cmd_show(&path),
        Commands::Demo { steps } => cmd_demo(steps),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::FAILURE
        }
    }
}

fn load_doc(path: &Path) -> Result<WiringDoc, sw_project::ProjectError> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("yaml" | "yml") => sw_project::load_yaml(path),
        _ => sw_project::load_json(path),
    }
}

fn cmd_validate(path: &Path) -> Result<(), Box<dyn Error>> {
    let doc = load_doc(path)?;
    println!("{} is valid (format v{})", path.display(), doc.version);
    println!(
        "  {} nodes, {} handles, {} edges",
        doc.nodes.len(),
        doc.handles.len(),
        doc.edges.len()
    );
    println!("  fingerprint {}", sw_project::fingerprint(&doc));
    Ok(())
}

fn cmd_show(path: &Path) -> Result<(), Box<dyn Error>> {
    let doc = load_doc(path)?;
    println!("wiring document '{}'", doc.name);
    for (id, node) in &doc.nodes {
        println!("  node {id} ({:?})", node.role);
        for handle_id in node.sources.iter().chain(node.targets.iter()) {
            if let Some(handle) = doc.handles.get(handle_id) {
                let direction = if handle.is_source { "source" } else { "target" };
                println!(
                    "    {direction} {handle_id} '{}' [{}]{}",
                    handle.name,
                    handle.kind,
                    if handle.enabled { "" } else { " (disabled)" },
                );
            }
        }
    }
    for (id, edge) in &doc.edges {
        println!("  edge {id}: {} -> {}", edge.source, edge.target);
    }
    Ok(())
}

fn anchor_handle(graph: &Graph, anchor: AnchorKind, name: &str) -> Option<HandleId> {
    let node = graph.node(graph.anchor(anchor)?)?;
    node.handles()
        .find(|&id| graph.handle(id).is_some_and(|h| h.name == name))
}

fn cmd_demo(steps: u32) -> Result<(), Box<dyn Error>> {
    let mut rio = EmulatedRio::new();
    rio.add_device(DeviceCategory::CanMotor, "CAN[1]", true);
    rio.add_device(DeviceCategory::CanMotor, "CAN[2]", true);
    rio.add_device(DeviceCategory::Encoder, "DIO[0]", true);

    let mut sim = LoopbackSim::new();
    sim.add_driver("drivetrain/left", Value::Scalar(0.0));
    sim.add_stimulus("drivetrain/left_encoder", Value::Scalar(0.0));

    let mut graph = build_default(&rio, &sim)?;
    let motor_a = anchor_handle(&graph, AnchorKind::RobotIo, "CAN[1]").ok_or("missing CAN[1]")?;
    let motor_b = anchor_handle(&graph, AnchorKind::RobotIo, "CAN[2]").ok_or("missing CAN[2]")?;
    let encoder = anchor_handle(&graph, AnchorKind::RobotIo, "DIO[0]").ok_or("missing DIO[0]")?;
    let driver = anchor_handle(&graph, AnchorKind::SimInput, "drivetrain/left")
        .ok_or("missing driver")?;
    let feedback = anchor_handle(&graph, AnchorKind::SimOutput, "drivetrain/left_encoder")
        .ok_or("missing stimulus")?;

    // Two motors summed into one driver; encoder fed back from the sim.
    graph.make_connection(motor_a, driver);
    graph.make_connection(motor_b, driver);
    graph.make_connection(feedback, encoder);

    let mut bank = FlowBank::new();
    if !bank.install(compile(&graph, &rio, &sim)) {
        return Err("demo graph failed to compile".into());
    }
    println!("compiled {} flows", bank.len());

    for step in 0..steps {
        let duty = f64::from(step) * 0.1;
        rio.set_output(DeviceCategory::CanMotor, "CAN[1]", Value::Scalar(duty));
        rio.set_output(DeviceCategory::CanMotor, "CAN[2]", Value::Scalar(duty / 2.0));
        sim.set_stimulus(
            "drivetrain/left_encoder",
            Value::Scalar(f64::from(step) * 512.0),
        );
        bank.tick();

        let command = sim.driver_value("drivetrain/left");
        let count = rio.input(DeviceCategory::Encoder, "DIO[0]");
        println!("step {step}: drivetrain/left <- {command:?}, DIO[0] <- {count:?}");
    }

    let doc = sw_project::from_graph("demo", &graph);
    println!("wiring fingerprint {}", sw_project::fingerprint(&doc));
    Ok(())
}
