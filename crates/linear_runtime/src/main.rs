//! Linear Allocator Runtime
//!
//! Demo binary: builds an allocator, stores two integers and prints them back

use anyhow::{Context, Result};
use linear_core::{AllocatorConfig, LinearAllocator};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Linear allocator v{}", linear_core::VERSION);

    let config = match std::env::args().nth(1) {
        Some(path) => AllocatorConfig::load(&path)
            .with_context(|| format!("failed to load allocator config from {path}"))?,
        None => AllocatorConfig::default(),
    };
    let mut allocator = config.build().context("failed to initialize allocator")?;

    run_demo(&mut allocator)?;

    let stats = serde_json::to_string(allocator.stats()).context("serializing allocator stats")?;
    tracing::info!(%stats, "demo finished");
    Ok(())
}

fn run_demo(allocator: &mut LinearAllocator) -> Result<()> {
    let mut arena = allocator.scope();

    let h1 = arena.allocate(2).context("allocating value 1")?;
    let h2 = arena.allocate(4).context("allocating value 2")?;

    arena.store::<i16>(h1, 100);
    arena.store::<i32>(h2, 200);

    let v1 = arena.load::<i16>(h1);
    let v2 = arena.load::<i32>(h2);

    println!("value 1: {v1}");
    println!("value 2: {v2}");

    println!("address 1: {:p}", arena.bytes(h1).as_ptr());
    println!("address 2: {:p}", arena.bytes(h2).as_ptr());

    Ok(())
}
