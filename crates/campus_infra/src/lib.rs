mod http;
mod session_repository;

pub use http::CampusHttpService;
pub use session_repository::SessionJsonRepository;
