//! Timed-ability runtime for the special role.
//!
//! This crate turns host lifecycle events into per-entity timed processes:
//! the loadout equip, the weapon check loop and the disguise effect. Hosts
//! embed [`AbilityPlugin`], forward events through
//! [`AbilityPlugin::dispatch`] and advance its scheduler once per frame.
//!
//! Modules are organized by responsibility:
//! - [`scheduler`] defines the task runner abstraction and a frame-driven implementation
//! - [`registry`] owns per-entity task handles, cooldowns and saved display identities
//! - [`loadout`] and [`disguise`] implement the two abilities
//! - [`events`] and [`handlers`] route host events to the abilities
//! - [`plugin`] ties everything together behind enable/disable
//! - [`driver`] runs frames in real time for hosts without a frame loop
pub mod disguise;
pub mod driver;
pub mod error;
pub mod events;
pub mod handlers;
pub mod loadout;
pub mod notice;
pub mod plugin;
pub mod registry;
pub mod scheduler;

pub use disguise::{ActivationOutcome, DisguiseAbility, DisguisePhase};
pub use driver::TickDriver;
pub use error::{PluginError, Result};
pub use events::LifecycleEvent;
pub use handlers::{HandlerContext, HandlerCriticality, HandlerRegistry, LifecycleHandler};
pub use loadout::LoadoutEnforcer;
pub use notice::Notice;
pub use plugin::AbilityPlugin;
pub use registry::{EntityRegistry, EntityTimedState};
pub use scheduler::{LoopBody, OnceBody, Scheduler, TaskHandle, TickScheduler};
