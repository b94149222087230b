//! 资源注册表 — 构造时一次性建立命名子资源树
//!
//! Resource tree plumbing.
//!
//! Every resource is built from a [`ResourceContext`] (shared config, session and HTTP
//! executor) and may register named children in a [`ResourceRegistry`] at construction time.
//! The tree is fixed once built; lookups never allocate or construct anything.

use std::any::Any;
use std::collections::HashMap;
use std::rc::Rc;

use crate::config::Config;
use crate::session::Session;
use crate::transport::{HttpExecutor, TransportError};

/// Shared state handed down the resource tree.
#[derive(Debug, Clone)]
pub struct ResourceContext {
    executor: HttpExecutor,
}

impl ResourceContext {
    pub fn new(config: Rc<Config>, session: Session) -> Result<Self, TransportError> {
        Ok(Self {
            executor: HttpExecutor::new(config, session)?,
        })
    }

    pub fn config(&self) -> &Config {
        self.executor.config()
    }

    pub fn session(&self) -> &Session {
        self.executor.session()
    }

    pub fn executor(&self) -> &HttpExecutor {
        &self.executor
    }

    /// True when both contexts point at the same config and session instances.
    pub fn shares_state_with(&self, other: &ResourceContext) -> bool {
        Rc::ptr_eq(self.executor.config(), other.executor.config())
            && self.session().shares_state_with(other.session())
    }
}

/// A client-side facade over a group of related endpoints.
pub trait Resource: Any {
    fn from_context(ctx: &ResourceContext) -> Self
    where
        Self: Sized;

    fn context(&self) -> &ResourceContext;
}

/// Named children of one resource.
pub struct ResourceRegistry {
    ctx: ResourceContext,
    resources: HashMap<&'static str, Box<dyn Any>>,
}

impl ResourceRegistry {
    pub fn new(ctx: &ResourceContext) -> Self {
        Self {
            ctx: ctx.clone(),
            resources: HashMap::new(),
        }
    }

    /// Build `R` from the shared context and file it under `name`.
    pub fn add<R: Resource>(&mut self, name: &'static str) -> &mut Self {
        let resource = R::from_context(&self.ctx);
        if self.resources.insert(name, Box::new(resource)).is_some() {
            panic!("resource '{}' registered twice", name);
        }
        self
    }

    /// Look up a registered child.
    ///
    /// # Panics
    ///
    /// When `name` was never registered or was registered with a different type. Both are
    /// wiring mistakes, not runtime conditions.
    pub fn get<R: Resource>(&self, name: &str) -> &R {
        let entry = self
            .resources
            .get(name)
            .unwrap_or_else(|| panic!("resource '{}' is not registered", name));
        entry.downcast_ref::<R>().unwrap_or_else(|| {
            panic!(
                "resource '{}' is not a {}",
                name,
                std::any::type_name::<R>()
            )
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.resources.contains_key(name)
    }

    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.resources.keys().copied().collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

impl std::fmt::Debug for ResourceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceRegistry")
            .field("resources", &self.names())
            .finish()
    }
}
