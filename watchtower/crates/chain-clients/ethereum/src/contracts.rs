use alloy::sol;

sol! {
    #[allow(missing_docs)]
    #[sol(rpc)]
    interface RocketStorage {
        function getAddress(bytes32 _key) external view returns (address);
        function getBool(bytes32 _key) external view returns (bool);
    }
}

sol! {
    #[allow(missing_docs)]
    #[sol(rpc)]
    interface RocketRewardsPool {
        struct RewardSubmission {
            uint256 rewardIndex;
            uint256 executionBlock;
            uint256 consensusBlock;
            bytes32 merkleRoot;
            string merkleTreeCID;
            uint256 intervalsPassed;
            uint256 treasuryRPL;
            uint256[] trustedNodeRPL;
            uint256[] nodeRPL;
            uint256[] nodeETH;
            uint256 userETH;
        }

        function getRewardIndex() external view returns (uint256);
        function getClaimIntervalTimeStart() external view returns (uint256);
        function getClaimIntervalTime() external view returns (uint256);
        function submitRewardSnapshot(RewardSubmission calldata _submission) external;
    }
}

sol! {
    #[allow(missing_docs)]
    #[sol(rpc)]
    interface RocketNetworkPrices {
        function getPricesBlock() external view returns (uint256);
        function getLatestReportableBlock() external view returns (uint256);
        function submitPrices(uint256 _block, uint256 _rplPrice) external;
    }
}

sol! {
    #[allow(missing_docs)]
    #[sol(rpc)]
    interface RocketDAOProtocolSettingsNetwork {
        function getSubmitPricesEnabled() external view returns (bool);
    }
}

sol! {
    #[allow(missing_docs)]
    #[sol(rpc)]
    interface RocketDAONodeTrusted {
        function getMemberCount() external view returns (uint256);
        function getMemberAt(uint256 _index) external view returns (address);
        function getMemberJoinedTime(address _nodeAddress) external view returns (uint256);
    }
}

sol! {
    #[allow(missing_docs)]
    #[sol(rpc)]
    interface UniswapV3Pool {
        function observe(uint32[] calldata secondsAgos) external view returns (int56[] memory tickCumulatives, uint160[] memory secondsPerLiquidityCumulativeX128s);
    }
}

// Optimism, Base and Polygon messengers share this surface.
sol! {
    #[allow(missing_docs)]
    #[sol(rpc)]
    interface RocketPriceMessenger {
        function rateStale() external view returns (bool);
        function submitRate() external;
    }
}

sol! {
    #[allow(missing_docs)]
    #[sol(rpc)]
    interface RocketArbitrumPriceMessenger {
        function submitRate(uint256 _maxSubmissionCost, uint256 _gasLimit, uint256 _gasPrice) external payable;
    }
}

sol! {
    #[allow(missing_docs)]
    #[sol(rpc)]
    interface RocketZkSyncPriceMessenger {
        function submitRate(uint256 _l2GasLimit, uint256 _l2GasPerPubdataByteLimit) external payable;
    }
}
