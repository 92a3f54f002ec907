pub mod api;
pub mod mock_server;
pub mod network;
pub mod storage;
