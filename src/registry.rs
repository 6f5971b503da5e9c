//! Copyright © 2025-2026 Wenze Wei. All Rights Reserved.
//!
//! This file is part of August.
//! The August project belongs to the Dunimd Team.
//!
//! Licensed under the Apache License, Version 2.0 (the "License");
//! You may not use this file except in compliance with the License.
//! You may obtain a copy of the License at
//!
//!     http://www.apache.org/licenses/LICENSE-2.0
//!
//! Unless required by applicable law or agreed to in writing, software
//! distributed under the License is distributed on an "AS IS" BASIS,
//! WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//! See the License for the specific language governing permissions and
//! limitations under the License.

//! # Augmentation Registry Module
//!
//! This module records which operations count as augmentations for a media
//! type, in the order they were declared.
//!
//! ## Registry Operations
//!
//! - Register an operation under its owning media type with a unique name
//! - List a media type's operations in declaration order
//! - Build a registry once per process through [`AuStaticRegistry`]
//!
//! Each media type owns a separate, typed `AuRegistry<M>`. Two media types
//! can therefore never share a list, even when their operations have the
//! same names.

use std::collections::HashSet;
use std::fmt;
use std::sync::OnceLock;

use rand::RngCore;

use crate::domain::AuMediaType;
use crate::errors::{AuError, Result};
use crate::operation::AuInvocation;

/// Signature of a registered operation. The receiver is passed explicitly
/// together with the random stream of the current augmentation pass.
pub type AuOperationFn<M> = fn(&mut M, &mut dyn RngCore) -> Result<AuInvocation>;

/// Named, type-owned augmentation known to a registry.
pub struct AuRegisteredOperation<M> {
    name: &'static str,
    owner: AuMediaType,
    invoke: AuOperationFn<M>,
}

impl<M> AuRegisteredOperation<M> {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn owner(&self) -> AuMediaType {
        self.owner
    }

    /// Runs the operation against `media`.
    pub fn invoke(&self, media: &mut M, rng: &mut dyn RngCore) -> Result<AuInvocation> {
        (self.invoke)(media, rng)
    }
}

impl<M> fmt::Debug for AuRegisteredOperation<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuRegisteredOperation")
            .field("name", &self.name)
            .field("owner", &self.owner)
            .finish()
    }
}

/// Ordered list of the operations registered for one media type.
pub struct AuRegistry<M> {
    owner: AuMediaType,
    operations: Vec<AuRegisteredOperation<M>>,
    names: HashSet<&'static str>,
}

impl<M> AuRegistry<M> {
    pub fn new(owner: AuMediaType) -> Self {
        AuRegistry {
            owner,
            operations: Vec::new(),
            names: HashSet::new(),
        }
    }

    pub fn owner(&self) -> AuMediaType {
        self.owner
    }

    /// Appends `operation` to the list of `type_tag`.
    ///
    /// Fails with [`AuError::DuplicateRegistration`] when `name` is already
    /// present, and with [`AuError::Registration`] when `type_tag` does not
    /// own this registry.
    pub fn register(
        &mut self,
        type_tag: AuMediaType,
        name: &'static str,
        operation: AuOperationFn<M>,
    ) -> Result<()> {
        if type_tag != self.owner {
            return Err(AuError::registration(format!(
                "operation '{}' declared for {} cannot join the {} registry",
                name, type_tag, self.owner
            )));
        }
        if !self.names.insert(name) {
            return Err(AuError::DuplicateRegistration {
                media_type: type_tag,
                operation: name.to_string(),
            });
        }
        self.operations.push(AuRegisteredOperation {
            name,
            owner: type_tag,
            invoke: operation,
        });
        Ok(())
    }

    /// Returns the operations of `type_tag` in declaration order.
    ///
    /// A tag that does not own this registry has no operations here.
    pub fn operations_for(&self, type_tag: AuMediaType) -> &[AuRegisteredOperation<M>] {
        if type_tag == self.owner {
            &self.operations
        } else {
            &[]
        }
    }

    /// Returns the operations of `type_tag` in declaration order, failing with
    /// [`AuError::Registration`] when `type_tag` does not own this registry.
    ///
    /// Media types look up their operations through this method, so a
    /// `MEDIA_TYPE` that disagrees with its registry never runs an empty pass.
    pub fn owned_operations(&self, type_tag: AuMediaType) -> Result<&[AuRegisteredOperation<M>]> {
        if type_tag != self.owner {
            return Err(AuError::registration(format!(
                "{} media cannot use the operations of the {} registry",
                type_tag, self.owner
            )));
        }
        Ok(&self.operations)
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.operations.iter().map(|operation| operation.name).collect()
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

impl<M> fmt::Debug for AuRegistry<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuRegistry")
            .field("owner", &self.owner)
            .field("operations", &self.names())
            .finish()
    }
}

/// Process-wide registry built on first access.
///
/// The build function runs at most once. A registration error is stored and
/// returned on every later access, so a broken media type can never run with
/// a partial operation list.
///
/// ```rust
/// static OPERATIONS: AuStaticRegistry<MyMedia> = AuStaticRegistry::new(register_operations);
/// ```
pub struct AuStaticRegistry<M: 'static> {
    cell: OnceLock<Result<AuRegistry<M>>>,
    build: fn() -> Result<AuRegistry<M>>,
}

impl<M: 'static> AuStaticRegistry<M> {
    pub const fn new(build: fn() -> Result<AuRegistry<M>>) -> Self {
        AuStaticRegistry {
            cell: OnceLock::new(),
            build,
        }
    }

    pub fn get(&'static self) -> Result<&'static AuRegistry<M>> {
        self.cell
            .get_or_init(self.build)
            .as_ref()
            .map_err(Clone::clone)
    }
}
