//! Data source implementations

pub mod autopilot_model_build;
pub mod flex_plugin;
pub mod proxy_short_codes;
pub mod serverless_environment;
pub mod sip_domain_ip_access_control_list_mapping;
pub mod sip_trunking_ip_access_control_list;
pub mod taskrouter_workflows;
pub mod video_recording_settings;

pub use autopilot_model_build::ModelBuildDataSource;
pub use flex_plugin::FlexPluginDataSource;
pub use proxy_short_codes::ShortCodesDataSource;
pub use serverless_environment::EnvironmentDataSource;
pub use sip_domain_ip_access_control_list_mapping::DomainIpAccessControlListMappingDataSource;
pub use sip_trunking_ip_access_control_list::TrunkIpAccessControlListDataSource;
pub use taskrouter_workflows::WorkflowsDataSource;
pub use video_recording_settings::RecordingSettingsDataSource;
