//! Graph population from the external inventories.

use sw_core::NodeId;
use sw_devices::{DeviceDescriptor, RobotIoBackend};
use sw_graph::{AnchorKind, Graph, GraphResult, HandleOrigin, HandleSpec, NodeRole, Position};
use sw_sim::SimulationLayer;
use tracing::debug;

// Default anchor layout: robot-IO on the left, simulation on the right.
const ROBOT_IO_POS: Position = Position { x: -260.0, y: 0.0 };
const SIM_INPUT_POS: Position = Position { x: 260.0, y: -140.0 };
const SIM_OUTPUT_POS: Position = Position { x: 260.0, y: 140.0 };

/// Build the default wiring graph: the three anchors, one handle per
/// reported device, driver, and stimulus.
///
/// Robot-side handles take their kind from the device category table and
/// default `enabled` from the device's init state. Target handles permit
/// fan-in exactly when their kind aggregates.
pub fn build_default(
    rio: &dyn RobotIoBackend,
    sim: &dyn SimulationLayer,
) -> GraphResult<Graph> {
    let mut graph = Graph::new();

    let robot_io = graph.add_node(NodeRole::Anchor(AnchorKind::RobotIo), ROBOT_IO_POS)?;
    populate_robot_io(&mut graph, robot_io, rio)?;

    let sim_input = graph.add_node(NodeRole::Anchor(AnchorKind::SimInput), SIM_INPUT_POS)?;
    for driver in sim.drivers() {
        graph.add_handle(
            sim_input,
            HandleSpec::target(driver.kind, driver.origin_id.clone())
                .many(driver.kind.is_aggregable())
                .origin(HandleOrigin::Driver {
                    driver_id: driver.origin_id,
                }),
        )?;
    }

    let sim_output = graph.add_node(NodeRole::Anchor(AnchorKind::SimOutput), SIM_OUTPUT_POS)?;
    for stimulus in sim.stimuli() {
        graph.add_handle(
            sim_output,
            HandleSpec::source(stimulus.kind, stimulus.origin_id.clone()).origin(
                HandleOrigin::Stimulus {
                    stimulus_id: stimulus.origin_id,
                },
            ),
        )?;
    }

    debug!(
        handles = graph.handle_count(),
        "built default wiring graph"
    );
    Ok(graph)
}

/// Remove and rebuild only the robot-IO anchor from the current device
/// inventory.
///
/// Every other node survives, along with any edge not touching a removed
/// handle. Edges into removed handles are lost; stale connections are not
/// migrated.
pub fn refresh_robot_io(graph: &mut Graph, rio: &dyn RobotIoBackend) -> GraphResult<()> {
    if let Some(node) = graph.anchor(AnchorKind::RobotIo) {
        graph.remove_node(node);
    }
    let robot_io = graph.add_node(NodeRole::Anchor(AnchorKind::RobotIo), ROBOT_IO_POS)?;
    populate_robot_io(graph, robot_io, rio)?;
    debug!("refreshed robot-IO anchor from device inventory");
    Ok(())
}

fn populate_robot_io(
    graph: &mut Graph,
    anchor: NodeId,
    rio: &dyn RobotIoBackend,
) -> GraphResult<()> {
    for device in rio.devices() {
        let DeviceDescriptor {
            category,
            origin_id,
            initialized,
        } = device;
        let kind = category.signal_kind();
        let spec = if category.is_robot_output() {
            HandleSpec::source(kind, origin_id.clone())
        } else {
            HandleSpec::target(kind, origin_id.clone()).many(kind.is_aggregable())
        };
        graph.add_handle(
            anchor,
            spec.enabled(initialized).origin(HandleOrigin::Device {
                category,
                device_id: origin_id,
            }),
        )?;
    }
    Ok(())
}
