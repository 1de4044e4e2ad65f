pub mod event_service;
pub mod event_service_impl;
pub use event_service::{EventError, EventService};
pub use event_service_impl::SeaOrmEventService;

pub mod report_service;
pub mod report_service_impl;
pub use report_service::{ReportError, ReportService, UsageReport};
pub use report_service_impl::SeaOrmReportService;

pub mod token_service;
pub mod token_service_impl;
pub use token_service::{IssuedToken, TokenError, TokenService};
pub use token_service_impl::SeaOrmTokenService;
