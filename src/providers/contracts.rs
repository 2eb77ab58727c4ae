//! ABI of the Maker contracts the savings screen talks to.

use alloy_sol_types::sol;

sol! {
    /// Stable token (ERC-20 subset)
    interface IERC20 {
        function balanceOf(address owner) external view returns (uint256);
        function approve(address spender, uint256 amount) external returns (bool);
    }

    /// DsrManager: joins and exits the Pot on behalf of an account
    interface IDsrManager {
        function daiBalance(address usr) external returns (uint256 wad);
        function join(address dst, uint256 wad) external;
        function exit(address dst, uint256 wad) external;
        function exitAll(address dst) external;
    }

    /// Pot: holds the per-second savings rate
    interface IPot {
        function dsr() external view returns (uint256);
    }
}
