use syn::punctuated::Punctuated;
use syn::spanned::Spanned;
use syn::{Attribute, Expr, MetaNameValue, Result as SynResult, Token};

/// 变体级配置：#[event(name = "...", marker = path::To::Marker)]
#[derive(Default)]
pub(crate) struct VariantEventConfig {
    pub(crate) name: Option<syn::LitStr>,
    pub(crate) marker: Option<syn::Path>,
}

/// 取出变体上的 #[event(...)]，其余属性原样保留
pub(crate) fn take_event_attrs(attrs: &mut Vec<Attribute>) -> SynResult<VariantEventConfig> {
    let mut cfg = VariantEventConfig::default();
    let mut retained = Vec::with_capacity(attrs.len());

    for attr in attrs.drain(..) {
        if !attr.path().is_ident("event") {
            retained.push(attr);
            continue;
        }
        merge_variant_attr(&mut cfg, &attr)?;
    }

    *attrs = retained;

    if let (Some(name), Some(_)) = (&cfg.name, &cfg.marker) {
        return Err(syn::Error::new(
            name.span(),
            "'name' cannot be combined with 'marker'; the reused marker already defines its name",
        ));
    }

    Ok(cfg)
}

fn merge_variant_attr(cfg: &mut VariantEventConfig, attr: &Attribute) -> SynResult<()> {
    let syn::Meta::List(_) = &attr.meta else {
        return Err(syn::Error::new(attr.span(), "expected #[event(...)]"));
    };

    let pairs: Punctuated<MetaNameValue, Token![,]> =
        attr.parse_args_with(Punctuated::<MetaNameValue, Token![,]>::parse_terminated)?;

    for kv in pairs {
        let Some(key) = kv.path.get_ident() else {
            return Err(syn::Error::new(
                kv.path.span(),
                "expected a plain key; expected 'name' | 'marker'",
            ));
        };
        match key.to_string().as_str() {
            "name" => {
                if cfg.name.is_some() {
                    return Err(syn::Error::new(
                        key.span(),
                        "duplicate key 'name' in attribute",
                    ));
                }
                let lit = match kv.value {
                    Expr::Lit(syn::ExprLit {
                        lit: syn::Lit::Str(lit),
                        ..
                    }) => lit,
                    other => {
                        return Err(syn::Error::new(
                            other.span(),
                            "expected string literal for 'name'",
                        ));
                    }
                };
                cfg.name = Some(lit);
            }
            "marker" => {
                if cfg.marker.is_some() {
                    return Err(syn::Error::new(
                        key.span(),
                        "duplicate key 'marker' in attribute",
                    ));
                }
                let path = match kv.value {
                    Expr::Path(p) if p.qself.is_none() => p.path,
                    other => {
                        return Err(syn::Error::new(
                            other.span(),
                            "expected a type path for 'marker'",
                        ));
                    }
                };
                cfg.marker = Some(path);
            }
            _ => {
                return Err(syn::Error::new(
                    key.span(),
                    "unknown key; expected 'name' | 'marker'",
                ));
            }
        }
    }

    Ok(())
}
