//! SUMO routes-document output.
//!
//! Emits the `.rou.xml` layout the simulator's route loader expects: two
//! `vType` declarations (passenger and emergency), then one `vehicle`
//! element per spawn event with a nested `route` holding the edge list.

use std::io::Write;
use std::path::Path;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::Writer;

use crate::{DemandResult, VehicleClass, VehicleSpawnEvent};

const XSI_NS: &str = "http://www.w3.org/2001/XMLSchema-instance";
const SCHEMA: &str = "http://sumo.dlr.de/xsd/routes_file.xsd";

/// Write the routes document for `events` to `path`.
pub fn write_route_file(path: &Path, events: &[VehicleSpawnEvent]) -> DemandResult<()> {
    let file = std::fs::File::create(path)?;
    write_routes(file, events)
}

/// Like [`write_route_file`] but accepts any `Write` sink.  Useful for
/// testing (pass a `Vec<u8>`).
pub fn write_routes<W: Write>(sink: W, events: &[VehicleSpawnEvent]) -> DemandResult<()> {
    let mut w = Writer::new_with_indent(sink, b' ', 4);

    w.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut routes = BytesStart::new("routes");
    routes.push_attribute(("xmlns:xsi", XSI_NS));
    routes.push_attribute(("xsi:noNamespaceSchemaLocation", SCHEMA));
    w.write_event(Event::Start(routes))?;

    // Vehicle type declarations.
    let mut passenger = BytesStart::new("vType");
    passenger.push_attribute(("id", "veh_passenger"));
    passenger.push_attribute(("vClass", "passenger"));
    w.write_event(Event::Empty(passenger))?;

    let mut emergency = BytesStart::new("vType");
    emergency.push_attribute(("id", "veh_emergency"));
    emergency.push_attribute(("vClass", "passenger"));
    emergency.push_attribute(("color", "red"));
    emergency.push_attribute(("width", "2.5"));
    w.write_event(Event::Empty(emergency))?;

    for event in events {
        let vtype = match event.class {
            VehicleClass::Passenger => "veh_passenger",
            VehicleClass::Emergency => "veh_emergency",
        };

        let mut vehicle = BytesStart::new("vehicle");
        vehicle.push_attribute(("id", event.id.as_str()));
        vehicle.push_attribute(("type", vtype));
        vehicle.push_attribute(("depart", format!("{:.2}", event.depart_secs).as_str()));
        vehicle.push_attribute(("departLane", "best"));
        vehicle.push_attribute(("departSpeed", "max"));
        w.write_event(Event::Start(vehicle))?;

        let mut route = BytesStart::new("route");
        route.push_attribute(("edges", event.route.join(" ").as_str()));
        w.write_event(Event::Empty(route))?;

        w.write_event(Event::End(BytesEnd::new("vehicle")))?;
    }

    w.write_event(Event::End(BytesEnd::new("routes")))?;
    Ok(())
}
