//! Simulation structure: entities and components
//!
//! Activities live in a hierarchy: an [`Entity`] (a business, a household)
//! owns one general ledger and a tree of [`Component`]s, and each component
//! holds activities and child components. The hierarchy assigns every node
//! its path (`entity/component/activity`), which activities stamp onto
//! transactions as the provenance tag.
//!
//! Running an entity for one period runs every activity in its subtree
//! against the entity's own ledger.

use crate::activity::{Activity, ActivityError};
use crate::core::clock::{Clock, ClockError};
use crate::ledger::GeneralLedger;

/// A named grouping of activities and child components
///
/// Components own their activities as trait objects so different activity
/// kinds can share a subtree.
pub struct Component {
    /// Component name
    name: String,

    /// Optional description
    description: Option<String>,

    /// Hierarchical path; `name` until a parent path is set
    path: String,

    /// Child components
    components: Vec<Component>,

    /// Activities directly owned by this component
    activities: Vec<Box<dyn Activity>>,
}

impl Component {
    /// Create a new empty component
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            description: None,
            path: name.to_string(),
            components: Vec::new(),
            activities: Vec::new(),
        }
    }

    /// Set description (builder pattern)
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// Get component name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get description
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Get hierarchical path
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Get child components
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// Get owned activities
    pub fn activities(&self) -> &[Box<dyn Activity>] {
        &self.activities
    }

    /// Add a child component; its subtree is re-pathed under this component
    pub fn add_component(&mut self, mut component: Component) {
        component.set_parent_path(&self.path);
        self.components.push(component);
    }

    /// Add an activity; it is re-pathed under this component
    pub fn add_activity(&mut self, mut activity: Box<dyn Activity>) {
        activity.set_parent_path(&self.path);
        self.activities.push(activity);
    }

    /// Set the parent path and propagate through the subtree
    pub fn set_parent_path(&mut self, parent: &str) {
        self.path = format!("{}/{}", parent, self.name);
        for component in &mut self.components {
            component.set_parent_path(&self.path);
        }
        for activity in &mut self.activities {
            activity.set_parent_path(&self.path);
        }
    }

    /// Prepare every activity in the subtree for a run
    pub fn prepare_to_run(
        &mut self,
        clock: &Clock,
        period_count: usize,
    ) -> Result<(), ClockError> {
        for component in &mut self.components {
            component.prepare_to_run(clock, period_count)?;
        }
        for activity in &mut self.activities {
            activity.prepare_to_run(clock, period_count)?;
        }
        Ok(())
    }

    /// Run every activity in the subtree at the clock's current period
    pub fn run(&mut self, clock: &Clock, ledger: &mut GeneralLedger) -> Result<(), ActivityError> {
        for component in &mut self.components {
            component.run(clock, ledger)?;
        }
        for activity in &mut self.activities {
            activity.run(clock, ledger)?;
        }
        Ok(())
    }
}

/// A root simulation participant owning a general ledger
///
/// All activities under an entity book against that entity's ledger.
pub struct Entity {
    /// Entity name; also the root of every path in the subtree
    name: String,

    /// Optional description
    description: Option<String>,

    /// The entity's general ledger
    gl: GeneralLedger,

    /// Top-level components
    components: Vec<Component>,
}

impl Entity {
    /// Create a new entity owning the given ledger
    pub fn new(name: &str, gl: GeneralLedger) -> Self {
        Self {
            name: name.to_string(),
            description: None,
            gl,
            components: Vec::new(),
        }
    }

    /// Set description (builder pattern)
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// Get entity name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get description
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Get the entity's general ledger
    pub fn general_ledger(&self) -> &GeneralLedger {
        &self.gl
    }

    /// Get top-level components
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// Add a top-level component; its subtree is re-pathed under the entity
    pub fn add_component(&mut self, mut component: Component) {
        component.set_parent_path(&self.name);
        self.components.push(component);
    }

    /// Prepare every activity in the entity for a run
    pub fn prepare_to_run(
        &mut self,
        clock: &Clock,
        period_count: usize,
    ) -> Result<(), ClockError> {
        for component in &mut self.components {
            component.prepare_to_run(clock, period_count)?;
        }
        Ok(())
    }

    /// Run every activity in the entity at the clock's current period
    pub fn run(&mut self, clock: &Clock) -> Result<(), ActivityError> {
        for component in &mut self.components {
            component.run(clock, &mut self.gl)?;
        }
        Ok(())
    }
}
