pub const DESERIALIZATION_ERROR_MSG: &str = "Deserialization Error: expected value at line 1 column 1.";
pub const DNS_LOOKUP_ERROR_MSG: &str =
    "failed to lookup address information: nodename nor servname provided, or not known";
