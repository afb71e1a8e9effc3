//! Declarations and interface descriptors most fragments need.
//!
//! [`OUTER_DEFS`] and [`INNER_DEFS`] are meant for [`crate::FragmentSpec::with_outer_defs`] and
//! [`crate::FragmentSpec::with_inner_defs`]; [`builtin_abis`] complements the compiled unit's own
//! ABI when decoding simulated logs.

use crate::InterfaceDescriptor;

/// Token interfaces callable from a fragment.
pub const OUTER_DEFS: [&str; 3] = [
    r#"interface IERC20 {
    event Transfer(address indexed from, address indexed to, uint256 amount);
    event Approval(address indexed owner, address indexed spender, uint256 allowance);
    function totalSupply() external view returns (uint256);
    function name() external view returns (string memory);
    function symbol() external view returns (string memory);
    function decimals() external view returns (uint256);
    function balanceOf(address owner) external view returns (uint256);
    function allowance(address owner, address spender) external view returns (uint256);
    function approve(address spender, uint256 amount) external returns (bool);
    function transfer(address to, uint256 amount) external returns (bool);
    function transferFrom(address owner, address to, uint256 amount) external returns (bool);
}"#,
    r#"interface IERC721 {
    event Transfer(address indexed from, address indexed to, uint256 indexed tokenId);
    event Approval(address indexed owner, address indexed operator, uint256 indexed tokenId);
    event ApprovalForAll(address indexed owner, address indexed operator, bool approved);
    function name() external view returns (string memory);
    function symbol() external view returns (string memory);
    function balanceOf(address owner) external view returns (uint256);
    function ownerOf(uint256 tokenId) external view returns (address);
    function isApprovedForAll(address owner, address operator) external view returns (bool);
    function getApproved(uint256 tokenId) external view returns (address);
    function approve(address operator, uint256 tokenId) external;
    function setApprovalForAll(address operator, bool isApproved) external;
    function transferFrom(address owner, address to, uint256 tokenId) external;
    function safeTransferFrom(address owner, address to, uint256 tokenId) external;
    function safeTransferFrom(address owner, address to, uint256 tokenId, bytes calldata data) external;
}"#,
    r#"interface IWETH is IERC20 {
    function deposit() external payable;
    function withdraw(uint256 amount) external;
}"#,
];

/// `Result` event overloads a fragment can emit to report values.
pub const INNER_DEFS: [&str; 16] = [
    "event Result(uint256);",
    "event Result(uint256, uint256);",
    "event Result(uint256, uint256, uint256);",
    "event Result(string);",
    "event Result(string, string);",
    "event Result(string, uint256);",
    "event Result(uint256, string);",
    "event Result(bool);",
    "event Result(string, bool);",
    "event Result(bool, string);",
    "event Result(bytes);",
    "event Result(bytes, bytes);",
    "event Result(string, bytes);",
    "event Result(bytes, uint256);",
    "event Result(uint256, bytes);",
    "event Result(bytes4);",
];

const WETH_ABI: &str = include_str!("../abi/weth.json");
const ERC721_ABI: &str = include_str!("../abi/erc721.json");

/// The WETH (a superset of ERC20) and ERC721 descriptors, in that order.
///
/// Both define a `Transfer(address,address,uint256)` event; they differ only in which
/// parameters are indexed.
pub fn builtin_abis() -> Result<Vec<InterfaceDescriptor>, serde_json::Error> {
    [WETH_ABI, ERC721_ABI].into_iter().map(serde_json::from_str).collect()
}
