//! Activate the MPIT service against the linked MPI library and list the
//! performance variables it allocated handles for.
//!
//! Run with: RUST_LOG=mpit=debug mpiexec -n 2 ./target/debug/examples/pvar_discovery

use mpit_service::{Allocation, MpitService, NativeTool, Registration, Service, ToolInterface};

fn main() {
    env_logger::init();

    // ========================================================================
    // Single service, driven directly
    // ========================================================================
    let mut service = MpitService::new(NativeTool::new());
    service.register();

    match service.registration() {
        Some(Registration::Enabled(Allocation::Complete {
            num_pvars,
            allocated,
        })) => {
            println!("PASS: {allocated} handles allocated, {num_pvars} PVARs covered");
        }
        Some(Registration::Enabled(Allocation::Partial { completed, error })) => {
            println!("PARTIAL: {completed} handles before failure: {error}");
        }
        Some(Registration::Enabled(other)) => println!("ENABLED: {other:?}"),
        Some(Registration::Disabled(err)) => {
            println!("DISABLED: {err}");
            return;
        }
        None => unreachable!("register() always records an outcome"),
    }

    // ========================================================================
    // Describe what was allocated
    // ========================================================================
    let num_handles = service.registrar().handles().len();
    for index in 0..num_handles {
        let Some(entry) = service.registrar().handles().get(index).copied() else {
            continue;
        };
        let info = service
            .registrar_mut()
            .tool_mut()
            .pvar_get_info(index)
            .unwrap_or_default();
        println!(
            "{index:4} {:<40} {:?} count={} {}",
            info.name,
            info.class,
            entry.count,
            info.description
        );
    }

    // ========================================================================
    // A second round with an unchanged count allocates nothing
    // ========================================================================
    let again = service.registrar_mut().allocate_handles();
    println!("second round: {again:?}");

    // ========================================================================
    // Registering again reuses the session instead of opening a second one
    // ========================================================================
    service.register();
    println!("re-registration: {:?}", service.registration());
}
