//! Normalized shapes handed to API clients and the CLI.

pub mod apartment;
pub mod area;
pub mod filters;
pub mod nearby;
pub mod transaction;
pub mod trend;

pub use apartment::{
    Apartment, ApartmentDetail, ApartmentKeys, AutocompleteItem, BuildingInfo, FacilityInfo,
    UnitsByArea,
};
pub use area::{AreaBand, AreaTypeView, UnitAreaRecord};
pub use filters::{HallwayType, SearchFilters, UnitsRange, YearBuiltRange};
pub use nearby::{SchoolInfo, SchoolItem, SchoolLevel, Station};
pub use transaction::{ContractType, DealingType, Rent, RentType, Trade};
pub use trend::{Period, RentTrendPoint, SaleTrendPoint};
