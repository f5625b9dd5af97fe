//! Operation table.
//!
//! Each entry names one API call and fixes its verb, path template and media
//! types. Facades start every request from [`Operation::request`] and pass the
//! same entry to [`InfluxClient::invoke_with_http_info`](crate::InfluxClient).

use crate::request::{RequestDescriptor, JSON_MIME};
use reqwest::Method;

/// Header carrying an OpenTracing span context
pub const ZAP_TRACE_SPAN: &str = "Zap-Trace-Span";

/// Static description of one API operation
#[derive(Debug, Clone)]
pub struct Operation {
    pub name: &'static str,
    pub method: Method,
    pub path: &'static str,
    pub content_types: &'static [&'static str],
    pub accepts: &'static [&'static str],
}

impl Operation {
    /// Start a request descriptor for this operation
    pub fn request(&self) -> RequestDescriptor {
        RequestDescriptor::new(self.method.clone(), self.path)
            .content_types(self.content_types)
            .accepts(self.accepts)
    }
}

const JSON: &[&str] = &[JSON_MIME];
const NONE: &[&str] = &[];

macro_rules! operation {
    ($ident:ident, $name:literal, $method:ident, $path:literal, $consumes:expr) => {
        pub static $ident: Operation = Operation {
            name: $name,
            method: Method::$method,
            path: $path,
            content_types: $consumes,
            accepts: JSON,
        };
    };
}

operation!(GET_TELEGRAF_PLUGINS, "GetTelegrafPlugins", GET, "/api/v2/telegraf/plugins", NONE);

operation!(GET_ORGS, "GetOrgs", GET, "/api/v2/orgs", NONE);
operation!(POST_ORGS, "PostOrgs", POST, "/api/v2/orgs", JSON);
operation!(GET_ORGS_ID, "GetOrgsID", GET, "/api/v2/orgs/{orgID}", NONE);
operation!(PATCH_ORGS_ID, "PatchOrgsID", PATCH, "/api/v2/orgs/{orgID}", JSON);
operation!(DELETE_ORGS_ID, "DeleteOrgsID", DELETE, "/api/v2/orgs/{orgID}", NONE);
operation!(GET_ORGS_ID_MEMBERS, "GetOrgsIDMembers", GET, "/api/v2/orgs/{orgID}/members", NONE);
operation!(POST_ORGS_ID_MEMBERS, "PostOrgsIDMembers", POST, "/api/v2/orgs/{orgID}/members", JSON);
operation!(
    DELETE_ORGS_ID_MEMBERS_ID,
    "DeleteOrgsIDMembersID",
    DELETE,
    "/api/v2/orgs/{orgID}/members/{userID}",
    NONE
);
operation!(GET_ORGS_ID_OWNERS, "GetOrgsIDOwners", GET, "/api/v2/orgs/{orgID}/owners", NONE);
operation!(POST_ORGS_ID_OWNERS, "PostOrgsIDOwners", POST, "/api/v2/orgs/{orgID}/owners", JSON);
operation!(
    DELETE_ORGS_ID_OWNERS_ID,
    "DeleteOrgsIDOwnersID",
    DELETE,
    "/api/v2/orgs/{orgID}/owners/{userID}",
    NONE
);

operation!(GET_USERS, "GetUsers", GET, "/api/v2/users", NONE);
operation!(POST_USERS, "PostUsers", POST, "/api/v2/users", JSON);
operation!(GET_USERS_ID, "GetUsersID", GET, "/api/v2/users/{userID}", NONE);
operation!(DELETE_USERS_ID, "DeleteUsersID", DELETE, "/api/v2/users/{userID}", NONE);

/// Every operation known to this client
pub static ALL: &[&Operation] = &[
    &GET_TELEGRAF_PLUGINS,
    &GET_ORGS,
    &POST_ORGS,
    &GET_ORGS_ID,
    &PATCH_ORGS_ID,
    &DELETE_ORGS_ID,
    &GET_ORGS_ID_MEMBERS,
    &POST_ORGS_ID_MEMBERS,
    &DELETE_ORGS_ID_MEMBERS_ID,
    &GET_ORGS_ID_OWNERS,
    &POST_ORGS_ID_OWNERS,
    &DELETE_ORGS_ID_OWNERS_ID,
    &GET_USERS,
    &POST_USERS,
    &GET_USERS_ID,
    &DELETE_USERS_ID,
];

/// Look up an operation by its name
pub fn find(name: &str) -> Option<&'static Operation> {
    ALL.iter().copied().find(|op| op.name == name)
}
