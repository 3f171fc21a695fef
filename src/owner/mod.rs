//! Owner management panels
//!
//! An owner manages exactly one shop or hospital. The dashboard loads it,
//! falls back to a creation prompt when it does not exist yet, and hands out
//! one [`CollectionEditor`] per nested collection.

mod collection;
mod create;
mod drafts;

use medinear_session::Role;

use crate::error::Result;
use crate::fetch::ApiClient;
use crate::hospitals::{Doctor, Hospital, HospitalService, HospitalsApi, MedicalTest};
use crate::shops::{MedicalShop, MedicalShopsApi, Medicine};
use crate::MediNear;

pub use collection::*;
pub use create::*;
pub use drafts::*;

/// What kind of resource an owner role manages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnerKind {
    MedicalShop,
    Hospital,
}

impl OwnerKind {
    pub fn for_role(role: Role) -> Option<Self> {
        match role {
            Role::MedicalShopOwner => Some(Self::MedicalShop),
            Role::HospitalOwner => Some(Self::Hospital),
            Role::User => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::MedicalShop => "medical shop",
            Self::Hospital => "hospital",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum OwnedResource {
    Shop(MedicalShop),
    Hospital(Hospital),
}

impl OwnedResource {
    pub fn resource_path(&self) -> String {
        match self {
            OwnedResource::Shop(shop) => MedicalShopsApi::resource_path(&shop.id),
            OwnedResource::Hospital(hospital) => HospitalsApi::resource_path(&hospital.id),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum OwnerState {
    /// Nothing loaded yet
    Idle,
    /// The signed-in account is not an owner
    NotOwner,
    /// The owner has not created the resource; show the creation form
    NotCreated(OwnerKind),
    Loaded(OwnedResource),
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Overview,
    Medicines,
    Doctors,
    Tests,
    Services,
}

impl Tab {
    pub fn title(&self) -> &'static str {
        match self {
            Tab::Overview => "Overview",
            Tab::Medicines => "Manage Medicines",
            Tab::Doctors => "Manage Doctors",
            Tab::Tests => "Manage Tests",
            Tab::Services => "Manage Services",
        }
    }
}

/// Management screen for the signed-in owner
#[derive(Debug, Clone)]
pub struct OwnerDashboard {
    role: Role,
    state: OwnerState,
    active_tab: Tab,
}

impl OwnerDashboard {
    pub fn new(role: Role) -> Self {
        Self {
            role,
            state: OwnerState::Idle,
            active_tab: Tab::Overview,
        }
    }

    pub fn state(&self) -> &OwnerState {
        &self.state
    }

    pub fn active_tab(&self) -> Tab {
        self.active_tab
    }

    /// Fetch the owner's shop or hospital
    pub async fn load(&mut self, client: &MediNear) {
        let kind = match OwnerKind::for_role(self.role) {
            Some(kind) => kind,
            None => {
                self.state = OwnerState::NotOwner;
                return;
            }
        };

        let loaded = match kind {
            OwnerKind::MedicalShop => client
                .medical_shops()
                .my_shop()
                .await
                .map(OwnedResource::Shop),
            OwnerKind::Hospital => client
                .hospitals()
                .my_hospital()
                .await
                .map(OwnedResource::Hospital),
        };

        self.state = match loaded {
            Ok(resource) => OwnerState::Loaded(resource),
            Err(err) if err.is_not_found() => {
                log::info!("owner has no {} yet", kind.label());
                OwnerState::NotCreated(kind)
            }
            Err(err) => {
                log::warn!("failed to load owner {}: {}", kind.label(), err);
                OwnerState::Failed("Failed to load data".to_string())
            }
        };
        self.active_tab = Tab::Overview;
    }

    /// Use the resource returned by a creation form without refetching
    pub fn accept_created(&mut self, resource: OwnedResource) {
        self.state = OwnerState::Loaded(resource);
        self.active_tab = Tab::Overview;
    }

    /// Prompt shown above the creation form
    pub fn not_created_message(&self) -> Option<String> {
        match &self.state {
            OwnerState::NotCreated(kind) => {
                Some(format!("You have not created your {} yet.", kind.label()))
            }
            _ => None,
        }
    }

    /// Tabs on offer; none until a resource is loaded
    pub fn tabs(&self) -> Vec<Tab> {
        match &self.state {
            OwnerState::Loaded(OwnedResource::Shop(_)) => vec![Tab::Overview, Tab::Medicines],
            OwnerState::Loaded(OwnedResource::Hospital(_)) => {
                vec![Tab::Overview, Tab::Doctors, Tab::Tests, Tab::Services]
            }
            _ => Vec::new(),
        }
    }

    pub fn select_tab(&mut self, tab: Tab) -> bool {
        if self.tabs().contains(&tab) {
            self.active_tab = tab;
            true
        } else {
            false
        }
    }

    pub fn shop(&self) -> Option<&MedicalShop> {
        match &self.state {
            OwnerState::Loaded(OwnedResource::Shop(shop)) => Some(shop),
            _ => None,
        }
    }

    pub fn hospital(&self) -> Option<&Hospital> {
        match &self.state {
            OwnerState::Loaded(OwnedResource::Hospital(hospital)) => Some(hospital),
            _ => None,
        }
    }

    pub fn medicine_editor(&self) -> Option<CollectionEditor<Medicine>> {
        self.shop().map(CollectionEditor::from_owner)
    }

    pub fn doctor_editor(&self) -> Option<CollectionEditor<Doctor>> {
        self.hospital().map(CollectionEditor::from_owner)
    }

    pub fn test_editor(&self) -> Option<CollectionEditor<MedicalTest>> {
        self.hospital().map(CollectionEditor::from_owner)
    }

    pub fn service_editor(&self) -> Option<CollectionEditor<HospitalService>> {
        self.hospital().map(CollectionEditor::from_owner)
    }

    /// Write the items of an accepted command back into the loaded resource,
    /// so later editors start from what the server holds
    pub fn adopt<T: LineItem>(&mut self, command: &ReplaceCollection<T>) -> bool {
        let resource = match &mut self.state {
            OwnerState::Loaded(resource) => resource,
            _ => return false,
        };
        if resource.resource_path() != command.resource_path() {
            return false;
        }
        match T::collection_in(resource) {
            Some(items) => {
                *items = command.items().to_vec();
                true
            }
            None => false,
        }
    }

    /// Commit through an editor and keep the dashboard in step with it
    pub async fn commit<T: LineItem>(
        &mut self,
        editor: &mut CollectionEditor<T>,
        api: &ApiClient,
        command: &ReplaceCollection<T>,
    ) -> Result<()> {
        editor.commit(api, command).await?;
        self.adopt(command);
        Ok(())
    }
}
