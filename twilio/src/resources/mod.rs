//! Resource implementations

pub mod autopilot_task_field;
pub mod chat_channel_member;
pub mod conversations_conversation_webhook;
pub mod conversations_push_credential_fcm;
pub mod credentials_aws;
pub mod iam_api_key;
pub mod sip_domain;
pub mod sip_trunking_ip_access_control_list;
pub mod video_recording_settings;

pub use autopilot_task_field::TaskFieldResource;
pub use chat_channel_member::ChatChannelMemberResource;
pub use conversations_conversation_webhook::ConversationWebhookResource;
pub use conversations_push_credential_fcm::PushCredentialFcmResource;
pub use credentials_aws::AwsCredentialResource;
pub use iam_api_key::ApiKeyResource;
pub use sip_domain::SipDomainResource;
pub use sip_trunking_ip_access_control_list::TrunkIpAccessControlListResource;
pub use video_recording_settings::RecordingSettingsResource;
