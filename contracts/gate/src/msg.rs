use cosmwasm_schema::cw_serde;

#[cw_serde]
pub enum ExecuteMsg {
    /// Allow-list a router (admin only)
    AddRouter { router: String },

    /// Drop a router from the allow-list (admin only)
    RemoveRouter { router: String },

    /// Values below 1 are stored as 1
    SetLiquidityActivationSteps { steps: u64 },

    TransferAdmin { new_admin: String },
}

#[cw_serde]
pub enum QueryMsg {
    Config {},
    IsRouterAllowed { router: String },
    Routers {},
}

#[cw_serde]
pub struct ConfigResponse {
    pub admin: String,
    pub liquidity_activation_steps: u64,
}

#[cw_serde]
pub struct RouterResponse {
    pub router: String,
    pub added_at_step: u64,
}

#[cw_serde]
pub struct RoutersResponse {
    pub routers: Vec<RouterResponse>,
}
