use ethers::contract::abigen;

abigen!(
    FeeLockerAbigen,
    r#"[
        function feesToClaim(address feeOwner, address token) external view returns (uint256 balance)
        function claim(address feeOwner, address token) external
    ]"#
);
