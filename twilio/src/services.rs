//! Per-product registrations feeding the provider registry

use std::sync::Arc;
use tfplug::provider::{DataSourceRegistration, ResourceRegistration, ServiceRegistration};

use crate::api::Client;
use crate::data_sources::{
    self, autopilot_model_build, flex_plugin, proxy_short_codes, serverless_environment,
    sip_domain_ip_access_control_list_mapping, taskrouter_workflows,
    DomainIpAccessControlListMappingDataSource, EnvironmentDataSource, FlexPluginDataSource,
    ModelBuildDataSource, RecordingSettingsDataSource, ShortCodesDataSource,
    TrunkIpAccessControlListDataSource, WorkflowsDataSource,
};
use crate::resources::{
    self, autopilot_task_field, chat_channel_member, conversations_conversation_webhook,
    conversations_push_credential_fcm, credentials_aws, iam_api_key, sip_domain,
    ApiKeyResource, AwsCredentialResource, ChatChannelMemberResource,
    ConversationWebhookResource, PushCredentialFcmResource, RecordingSettingsResource,
    SipDomainResource, TaskFieldResource, TrunkIpAccessControlListResource,
};

pub struct AutopilotService;

impl ServiceRegistration<Client> for AutopilotService {
    fn name(&self) -> &'static str {
        "autopilot"
    }

    fn resources(&self) -> Vec<ResourceRegistration<Client>> {
        vec![ResourceRegistration {
            type_name: autopilot_task_field::TYPE_NAME,
            schema: autopilot_task_field::schema,
            factory: |client| Arc::new(TaskFieldResource::new(client)),
        }]
    }

    fn data_sources(&self) -> Vec<DataSourceRegistration<Client>> {
        vec![DataSourceRegistration {
            type_name: autopilot_model_build::TYPE_NAME,
            schema: autopilot_model_build::schema,
            factory: |client| Arc::new(ModelBuildDataSource::new(client)),
        }]
    }
}

pub struct ChatService;

impl ServiceRegistration<Client> for ChatService {
    fn name(&self) -> &'static str {
        "chat"
    }

    fn resources(&self) -> Vec<ResourceRegistration<Client>> {
        vec![ResourceRegistration {
            type_name: chat_channel_member::TYPE_NAME,
            schema: chat_channel_member::schema,
            factory: |client| Arc::new(ChatChannelMemberResource::new(client)),
        }]
    }
}

pub struct ConversationsService;

impl ServiceRegistration<Client> for ConversationsService {
    fn name(&self) -> &'static str {
        "conversations"
    }

    fn resources(&self) -> Vec<ResourceRegistration<Client>> {
        vec![
            ResourceRegistration {
                type_name: conversations_conversation_webhook::TYPE_NAME,
                schema: conversations_conversation_webhook::schema,
                factory: |client| Arc::new(ConversationWebhookResource::new(client)),
            },
            ResourceRegistration {
                type_name: conversations_push_credential_fcm::TYPE_NAME,
                schema: conversations_push_credential_fcm::schema,
                factory: |client| Arc::new(PushCredentialFcmResource::new(client)),
            },
        ]
    }
}

pub struct CredentialsService;

impl ServiceRegistration<Client> for CredentialsService {
    fn name(&self) -> &'static str {
        "credentials"
    }

    fn resources(&self) -> Vec<ResourceRegistration<Client>> {
        vec![ResourceRegistration {
            type_name: credentials_aws::TYPE_NAME,
            schema: credentials_aws::schema,
            factory: |client| Arc::new(AwsCredentialResource::new(client)),
        }]
    }
}

pub struct FlexService;

impl ServiceRegistration<Client> for FlexService {
    fn name(&self) -> &'static str {
        "flex"
    }

    fn data_sources(&self) -> Vec<DataSourceRegistration<Client>> {
        vec![DataSourceRegistration {
            type_name: flex_plugin::TYPE_NAME,
            schema: flex_plugin::schema,
            factory: |client| Arc::new(FlexPluginDataSource::new(client)),
        }]
    }
}

pub struct IamService;

impl ServiceRegistration<Client> for IamService {
    fn name(&self) -> &'static str {
        "iam"
    }

    fn resources(&self) -> Vec<ResourceRegistration<Client>> {
        vec![ResourceRegistration {
            type_name: iam_api_key::TYPE_NAME,
            schema: iam_api_key::schema,
            factory: |client| Arc::new(ApiKeyResource::new(client)),
        }]
    }
}

pub struct ProxyService;

impl ServiceRegistration<Client> for ProxyService {
    fn name(&self) -> &'static str {
        "proxy"
    }

    fn data_sources(&self) -> Vec<DataSourceRegistration<Client>> {
        vec![DataSourceRegistration {
            type_name: proxy_short_codes::TYPE_NAME,
            schema: proxy_short_codes::schema,
            factory: |client| Arc::new(ShortCodesDataSource::new(client)),
        }]
    }
}

pub struct ServerlessService;

impl ServiceRegistration<Client> for ServerlessService {
    fn name(&self) -> &'static str {
        "serverless"
    }

    fn data_sources(&self) -> Vec<DataSourceRegistration<Client>> {
        vec![DataSourceRegistration {
            type_name: serverless_environment::TYPE_NAME,
            schema: serverless_environment::schema,
            factory: |client| Arc::new(EnvironmentDataSource::new(client)),
        }]
    }
}

pub struct SipService;

impl ServiceRegistration<Client> for SipService {
    fn name(&self) -> &'static str {
        "sip"
    }

    fn resources(&self) -> Vec<ResourceRegistration<Client>> {
        vec![ResourceRegistration {
            type_name: sip_domain::TYPE_NAME,
            schema: sip_domain::schema,
            factory: |client| Arc::new(SipDomainResource::new(client)),
        }]
    }

    fn data_sources(&self) -> Vec<DataSourceRegistration<Client>> {
        vec![DataSourceRegistration {
            type_name: sip_domain_ip_access_control_list_mapping::TYPE_NAME,
            schema: sip_domain_ip_access_control_list_mapping::schema,
            factory: |client| Arc::new(DomainIpAccessControlListMappingDataSource::new(client)),
        }]
    }
}

pub struct SipTrunkingService;

impl ServiceRegistration<Client> for SipTrunkingService {
    fn name(&self) -> &'static str {
        "sip_trunking"
    }

    fn resources(&self) -> Vec<ResourceRegistration<Client>> {
        vec![ResourceRegistration {
            type_name: resources::sip_trunking_ip_access_control_list::TYPE_NAME,
            schema: resources::sip_trunking_ip_access_control_list::schema,
            factory: |client| Arc::new(TrunkIpAccessControlListResource::new(client)),
        }]
    }

    fn data_sources(&self) -> Vec<DataSourceRegistration<Client>> {
        vec![DataSourceRegistration {
            type_name: data_sources::sip_trunking_ip_access_control_list::TYPE_NAME,
            schema: data_sources::sip_trunking_ip_access_control_list::schema,
            factory: |client| Arc::new(TrunkIpAccessControlListDataSource::new(client)),
        }]
    }
}

pub struct TaskRouterService;

impl ServiceRegistration<Client> for TaskRouterService {
    fn name(&self) -> &'static str {
        "taskrouter"
    }

    fn data_sources(&self) -> Vec<DataSourceRegistration<Client>> {
        vec![DataSourceRegistration {
            type_name: taskrouter_workflows::TYPE_NAME,
            schema: taskrouter_workflows::schema,
            factory: |client| Arc::new(WorkflowsDataSource::new(client)),
        }]
    }
}

pub struct VideoService;

impl ServiceRegistration<Client> for VideoService {
    fn name(&self) -> &'static str {
        "video"
    }

    fn resources(&self) -> Vec<ResourceRegistration<Client>> {
        vec![ResourceRegistration {
            type_name: resources::video_recording_settings::TYPE_NAME,
            schema: resources::video_recording_settings::schema,
            factory: |client| Arc::new(RecordingSettingsResource::new(client)),
        }]
    }

    fn data_sources(&self) -> Vec<DataSourceRegistration<Client>> {
        vec![DataSourceRegistration {
            type_name: data_sources::video_recording_settings::TYPE_NAME,
            schema: data_sources::video_recording_settings::schema,
            factory: |client| Arc::new(RecordingSettingsDataSource::new(client)),
        }]
    }
}

/// Every product area the provider exposes
pub fn supported_services() -> Vec<Box<dyn ServiceRegistration<Client>>> {
    vec![
        Box::new(AutopilotService),
        Box::new(ChatService),
        Box::new(ConversationsService),
        Box::new(CredentialsService),
        Box::new(FlexService),
        Box::new(IamService),
        Box::new(ProxyService),
        Box::new(ServerlessService),
        Box::new(SipService),
        Box::new(SipTrunkingService),
        Box::new(TaskRouterService),
        Box::new(VideoService),
    ]
}
