/// Optional config file looked up in the project root.
pub const CONFIG_FILENAME: &str = "coverbuild.json";

/// Environment variable overriding the project root.
pub const ROOT_ENV_VAR: &str = "COVERBUILD_ROOT";

/// Suffix appended to a template's path to name its generated script.
pub const TEMPLATE_OUTPUT_SUFFIX: &str = ".js";
