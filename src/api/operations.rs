//! The operation catalog.
//!
//! The set of operations this client can fire is fixed and statically
//! known. Each [`Operation`] variant is a tagged descriptor carrying its
//! own GraphQL document; the `match` tables in the accessors are the
//! dispatch table keyed by that tag.
//!
//! Result payloads are plain JSON projected by caller-supplied map
//! functions; the documents below request the fields those projections
//! rely on.

/// Whether an operation reads or writes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OperationKind {
    /// A read-only query; results are cacheable.
    Query,
    /// A state-changing mutation; never cached.
    Mutation,
}

/// A named operation from the fixed catalog.
///
/// Immutable definition, shared across calls: one invocation of an
/// operation pairs a variant with concrete variables and per-call options.
///
/// # Example
///
/// ```rust
/// use saleor_api::api::{Operation, OperationKind};
///
/// assert_eq!(Operation::TokenCreate.kind(), OperationKind::Mutation);
/// assert_eq!(Operation::ProductDetails.name(), "ProductDetails");
/// assert!(Operation::TokenCreate.document().contains("tokenCreate"));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Sign in with email/password, obtaining an auth token.
    TokenCreate,
    /// Update the shipping address on a checkout.
    CheckoutShippingAddressUpdate,
    /// Request a change of the account email address.
    AccountEmailChange,
    /// Mark one of the user's addresses as the default.
    AccountSetDefaultAddress,
    /// Delete one of the user's addresses.
    AccountAddressDelete,
    /// Fetch a single product.
    ProductDetails,
    /// Fetch the signed-in user.
    UserDetails,
    /// Fetch a single order.
    OrderDetails,
}

impl Operation {
    /// Returns the operation's name, used for logging and cache keys.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::TokenCreate => "TokenCreate",
            Self::CheckoutShippingAddressUpdate => "CheckoutShippingAddressUpdate",
            Self::AccountEmailChange => "AccountEmailChange",
            Self::AccountSetDefaultAddress => "AccountSetDefaultAddress",
            Self::AccountAddressDelete => "AccountAddressDelete",
            Self::ProductDetails => "ProductDetails",
            Self::UserDetails => "UserDetails",
            Self::OrderDetails => "OrderDetails",
        }
    }

    /// Returns whether the operation is a query or a mutation.
    #[must_use]
    pub const fn kind(self) -> OperationKind {
        match self {
            Self::TokenCreate
            | Self::CheckoutShippingAddressUpdate
            | Self::AccountEmailChange
            | Self::AccountSetDefaultAddress
            | Self::AccountAddressDelete => OperationKind::Mutation,
            Self::ProductDetails | Self::UserDetails | Self::OrderDetails => OperationKind::Query,
        }
    }

    /// Returns the GraphQL document for this operation.
    #[must_use]
    pub const fn document(self) -> &'static str {
        match self {
            Self::TokenCreate => {
                r"mutation TokenCreate($email: String!, $password: String!) {
  tokenCreate(email: $email, password: $password) {
    token
    user {
      id
      email
    }
    errors {
      field
      message
    }
  }
}"
            }
            Self::CheckoutShippingAddressUpdate => {
                r"mutation CheckoutShippingAddressUpdate($checkoutId: ID!, $shippingAddress: AddressInput!) {
  checkoutShippingAddressUpdate(checkoutId: $checkoutId, shippingAddress: $shippingAddress) {
    checkout {
      id
      shippingAddress {
        firstName
        lastName
        streetAddress1
        city
        postalCode
        country {
          code
        }
      }
    }
    errors {
      field
      message
    }
  }
}"
            }
            Self::AccountEmailChange => {
                r"mutation AccountEmailChange($newEmail: String!, $password: String!, $redirectUrl: String!) {
  accountRequestEmailChange(newEmail: $newEmail, password: $password, redirectUrl: $redirectUrl) {
    user {
      id
      email
    }
    errors {
      field
      message
    }
  }
}"
            }
            Self::AccountSetDefaultAddress => {
                r"mutation AccountSetDefaultAddress($id: ID!, $type: AddressTypeEnum!) {
  accountSetDefaultAddress(id: $id, type: $type) {
    user {
      id
      defaultShippingAddress {
        id
      }
      defaultBillingAddress {
        id
      }
    }
    errors {
      field
      message
    }
  }
}"
            }
            Self::AccountAddressDelete => {
                r"mutation AccountAddressDelete($id: ID!) {
  accountAddressDelete(id: $id) {
    user {
      id
      addresses {
        id
      }
    }
    errors {
      field
      message
    }
  }
}"
            }
            Self::ProductDetails => {
                r"query ProductDetails($id: ID!) {
  product(id: $id) {
    id
    name
    description
    pricing {
      priceRange {
        start {
          gross {
            amount
            currency
          }
        }
      }
    }
  }
}"
            }
            Self::UserDetails => {
                r"query UserDetails {
  me {
    id
    email
    firstName
    lastName
    defaultShippingAddress {
      id
    }
  }
}"
            }
            Self::OrderDetails => {
                r"query OrderDetails($id: ID!) {
  order(id: $id) {
    id
    number
    status
    total {
      gross {
        amount
        currency
      }
    }
    lines {
      productName
      quantity
    }
  }
}"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_OPERATIONS: [Operation; 8] = [
        Operation::TokenCreate,
        Operation::CheckoutShippingAddressUpdate,
        Operation::AccountEmailChange,
        Operation::AccountSetDefaultAddress,
        Operation::AccountAddressDelete,
        Operation::ProductDetails,
        Operation::UserDetails,
        Operation::OrderDetails,
    ];

    #[test]
    fn test_every_document_names_the_operation() {
        for operation in ALL_OPERATIONS {
            assert!(
                operation.document().contains(operation.name()),
                "document for {} does not carry its name",
                operation.name()
            );
        }
    }

    #[test]
    fn test_kind_matches_document_keyword() {
        for operation in ALL_OPERATIONS {
            let document = operation.document();
            match operation.kind() {
                OperationKind::Query => assert!(document.starts_with("query")),
                OperationKind::Mutation => assert!(document.starts_with("mutation")),
            }
        }
    }

    #[test]
    fn test_every_mutation_requests_its_errors_list() {
        for operation in ALL_OPERATIONS {
            if operation.kind() == OperationKind::Mutation {
                assert!(
                    operation.document().contains("errors {"),
                    "mutation {} does not request domain errors",
                    operation.name()
                );
            }
        }
    }

    #[test]
    fn test_token_create_requests_token() {
        assert!(Operation::TokenCreate.document().contains("token\n"));
    }
}
