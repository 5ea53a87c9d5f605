pub mod args {
    pub const WHERE: &str = "where";
    pub const DATA: &str = "data";
}

pub mod operations {
    // nested operations
    pub const SET: &str = "set";
    pub const PUSH: &str = "push";
    pub const UPDATE: &str = "update";
    pub const UPDATE_MANY: &str = "updateMany";
    pub const DELETE_MANY: &str = "deleteMany";
    pub const UPSERT: &str = "upsert";
    pub const UNSET: &str = "unset";

    // scalar update operations
    pub const INCREMENT: &str = "increment";
    pub const DECREMENT: &str = "decrement";
    pub const MULTIPLY: &str = "multiply";
    pub const DIVIDE: &str = "divide";

    /// Every operation a composite update envelope can name, regardless of the field's arity.
    pub const COMPOSITE_ENVELOPE: &[&str] = &[SET, UPDATE, PUSH, UPSERT, UPDATE_MANY, DELETE_MANY, UNSET];
}

pub mod filters {
    // scalar filters
    pub const EQUALS: &str = "equals";
    pub const CONTAINS: &str = "contains";
    pub const STARTS_WITH: &str = "startsWith";
    pub const ENDS_WITH: &str = "endsWith";
    pub const LOWER_THAN: &str = "lt";
    pub const LOWER_THAN_OR_EQUAL: &str = "lte";
    pub const GREATER_THAN: &str = "gt";
    pub const GREATER_THAN_OR_EQUAL: &str = "gte";
    pub const IN: &str = "in";
    pub const NOT_IN: &str = "notIn";
    pub const NOT_LOWERCASE: &str = "not";
    pub const IS_SET: &str = "isSet";

    // scalar list filters
    pub const HAS: &str = "has";
    pub const HAS_SOME: &str = "hasSome";
    pub const HAS_EVERY: &str = "hasEvery";
    pub const IS_EMPTY: &str = "isEmpty";

    // composite filters
    pub const EVERY: &str = "every";
    pub const SOME: &str = "some";
    pub const NONE: &str = "none";
    pub const IS: &str = "is";
    pub const IS_NOT: &str = "isNot";

    // condition filters
    pub const AND: &str = "AND";
    pub const OR: &str = "OR";
    pub const NOT: &str = "NOT";
}
